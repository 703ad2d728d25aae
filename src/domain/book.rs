//! Order book types and the fill engine.
//!
//! This module provides types for representing one outcome's resting orders
//! and for simulating market orders against them:
//!
//! - [`PriceLevel`] - A single price level with amount
//! - [`OutcomeOrderBook`] - Bids and asks for one market outcome
//! - [`FillEngine`] - Closing long and short positions against a book
//!
//! # Order Book Structure
//!
//! An order book has two sides:
//! - **Bids**: Buy orders, sorted by price descending (best bid first)
//! - **Asks**: Sell orders, sorted by price ascending (best ask first)
//!
//! The book never sorts; callers hand it best-first levels.
//!
//! # Examples
//!
//! ```
//! use depthgauge::domain::book::{Execution, FillEngine, OutcomeOrderBook, PriceLevel};
//! use depthgauge::domain::market::MarketBounds;
//!
//! let mut book = OutcomeOrderBook::with_levels(
//!     vec![PriceLevel::new(0.9, 2.0), PriceLevel::new(0.8, 2.0)],
//!     vec![],
//! );
//!
//! let proceeds = book.close_long(3.0, &MarketBounds::unit(), Execution::Commit);
//! assert!((proceeds - 2.6).abs() < 1e-12);
//! assert_eq!(book.bids().len(), 1);
//! assert_eq!(book.best_bid().unwrap().amount(), 1.0);
//! ```

use serde::{Deserialize, Serialize};

use super::market::MarketBounds;

/// Whether a fill mutates the book or only prices it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Compute proceeds without touching the book.
    DryRun,
    /// Consume liquidity from the book.
    Commit,
}

impl Execution {
    #[must_use]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Commit)
    }
}

/// A single price level in an order book.
///
/// Represents aggregated resting orders at one price. An amount of zero
/// means the level is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    price: f64,
    amount: f64,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: f64, amount: f64) -> Self {
        Self { price, amount }
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }
}

/// Simulated execution against resting liquidity.
///
/// Every call names its [`Execution`] mode. A dry run returns the same
/// proceeds a commit would, but leaves the book unchanged.
pub trait FillEngine {
    /// Sell `shares` into the bids, best price first.
    ///
    /// Each share earns `price - bounds.min_price`. Returns what was filled
    /// if the bids run out; an empty side is zero proceeds, never an error.
    fn close_long(&mut self, shares: f64, bounds: &MarketBounds, mode: Execution) -> f64;

    /// Buy back `shares` from the asks, best price first.
    ///
    /// Each share earns `bounds.max_price - price`, the value locked in a
    /// short position that is released once it is covered.
    fn close_short(&mut self, shares: f64, bounds: &MarketBounds, mode: Execution) -> f64;

    /// Independent copy of both sides.
    #[must_use]
    fn deep_clone(&self) -> Self
    where
        Self: Sized;
}

/// Order book for a single market outcome.
///
/// Contains bid and ask price levels sorted by price (best prices first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOrderBook {
    /// Bid (buy) levels, sorted by price descending.
    bids: Vec<PriceLevel>,
    /// Ask (sell) levels, sorted by price ascending.
    asks: Vec<PriceLevel>,
}

impl OutcomeOrderBook {
    /// Creates a new empty order book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Creates a book with initial price levels.
    ///
    /// Bids should be sorted by price descending, asks by price ascending.
    #[must_use]
    pub const fn with_levels(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { bids, asks }
    }

    /// Returns all bid levels (sorted by price descending).
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    /// Returns all ask levels (sorted by price ascending).
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Returns the best (highest) bid, if any.
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Returns the best (lowest) ask, if any.
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// True when neither side has any levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

impl FillEngine for OutcomeOrderBook {
    fn close_long(&mut self, shares: f64, bounds: &MarketBounds, mode: Execution) -> f64 {
        take_best(&mut self.bids, shares, mode, |price| bounds.long_value(price))
    }

    fn close_short(&mut self, shares: f64, bounds: &MarketBounds, mode: Execution) -> f64 {
        take_best(&mut self.asks, shares, mode, |price| bounds.short_value(price))
    }

    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

/// Walk `levels` best-first until `shares` are filled or liquidity runs out.
///
/// On commit, fully consumed levels are removed and the boundary level keeps
/// whatever the fill left behind.
fn take_best(
    levels: &mut Vec<PriceLevel>,
    shares: f64,
    mode: Execution,
    value: impl Fn(f64) -> f64,
) -> f64 {
    if shares.is_nan() || shares <= 0.0 {
        return 0.0;
    }

    let mut remaining = shares;
    let mut proceeds = 0.0;
    let mut consumed = 0;

    while remaining > 0.0 {
        let Some(level) = levels.get_mut(consumed) else {
            break;
        };
        if level.amount > remaining {
            proceeds += remaining * value(level.price);
            if mode.is_commit() {
                level.amount -= remaining;
            }
            break;
        }
        proceeds += level.amount * value(level.price);
        remaining -= level.amount;
        consumed += 1;
    }

    if mode.is_commit() {
        levels.drain(..consumed);
    }
    proceeds
}
