//! Domain validation errors for the liquidity engine.
//!
//! These are contract violations: inputs the engine refuses to evaluate.
//! Thin books, empty outcomes and exhausted depth are never errors; they
//! simply produce a low retention ratio.
//!
//! # Examples
//!
//! ```
//! use depthgauge::domain::error::DomainError;
//! use depthgauge::domain::market::MarketBounds;
//!
//! let result = MarketBounds::try_new(1.0, 1.0);
//! assert!(matches!(result, Err(DomainError::InvalidBounds { .. })));
//! ```

use thiserror::Error;

use super::market::MarketKind;

/// Errors that occur when engine preconditions are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// At least one outcome order book is required.
    #[error("at least one outcome order book is required")]
    EmptyBooks,

    /// The capital being unwound must be positive.
    #[error("allowance must be positive, got {allowance}")]
    NonPositiveAllowance {
        /// The invalid allowance that was provided.
        allowance: f64,
    },

    /// The incremental search step must be positive.
    #[error("selling increment must be positive, got {increment}")]
    NonPositiveIncrement {
        /// The invalid increment that was provided.
        increment: f64,
    },

    /// Market bounds must describe a non-empty price range.
    #[error("max price {max_price} must be greater than min price {min_price}")]
    InvalidBounds {
        /// Lower bound of the range.
        min_price: f64,
        /// Upper bound of the range.
        max_price: f64,
    },

    /// Two-outcome markets need exactly two outcomes to be priced.
    #[error("{kind} market needs {expected} outcomes, got {actual}")]
    OutcomeCount {
        /// Kind of market being priced.
        kind: MarketKind,
        /// Number of outcomes that kind requires.
        expected: usize,
        /// Number of outcomes found.
        actual: usize,
    },

    /// The materiality threshold must be a finite, non-negative number.
    #[error("materiality epsilon must be finite and non-negative, got {epsilon}")]
    InvalidEpsilon {
        /// The invalid threshold.
        epsilon: f64,
    },
}
