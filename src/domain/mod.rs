//! Exchange-agnostic domain logic: books, fills and retention.

pub mod book;
pub mod curve;
pub mod error;
pub mod id;
pub mod market;
pub mod prediction;
pub mod retention;
pub mod snapshot;
pub mod summary;
pub mod tranche;

// Core domain types
pub use book::{Execution, FillEngine, OutcomeOrderBook, PriceLevel};
pub use error::DomainError;
pub use id::{MarketId, OutcomeId};
pub use market::{MarketBounds, MarketKind};
pub use tranche::Tranche;

// Liquidity engine
pub use curve::{CurvePoint, LiquidityCurve, LiquidityProfiler};
pub use retention::{RetentionCalculator, UnwindStrategy};

// Published views
pub use prediction::{OutcomeQuote, Prediction};
pub use summary::{MarketSummary, MarketsSummary};
