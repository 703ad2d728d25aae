//! Depthgauge - liquidity-depth curves for prediction markets.
//!
//! Reads per-block snapshots of prediction markets with their open orders,
//! and measures how much of a position's value survives being unwound
//! into the order books at several position sizes (tranches). The result,
//! together with best prices and outcome predictions, is published as a
//! JSON summary for every new block.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Order books, fill engine, retention search and summaries
//! - [`port`] - Traits for snapshot sources and summary writers
//! - [`adapter`] - File adapters and the command line interface
//! - [`service`] - Snapshot translation, evaluation and the polling watcher
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use depthgauge::domain::{
//!     LiquidityProfiler, MarketBounds, OutcomeOrderBook, PriceLevel,
//! };
//!
//! let book = OutcomeOrderBook::with_levels(
//!     vec![PriceLevel::new(0.5, 100.0)],
//!     vec![PriceLevel::new(0.5, 100.0)],
//! );
//! let curve = LiquidityProfiler::default()
//!     .curve(&MarketBounds::unit(), &[book])
//!     .unwrap();
//! assert!(curve.points().iter().all(|p| (p.retention_ratio - 1.0).abs() < 1e-9));
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod service;
