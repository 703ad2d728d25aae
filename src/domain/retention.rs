//! Liquidity retention: how much capital survives an immediate unwind.
//!
//! A position worth `allowance` is modelled as `allowance / range` complete
//! sets. Unwinding means selling those sets back into the visible books. The
//! retention ratio is what the unwind recovers divided by what went in.
//!
//! With one book (yes/no and scalar markets) the whole position is closed
//! in a single pass: sell the long leg into the bids and cover the short leg
//! against the asks.
//!
//! With several books (categorical markets) the position is sold in small
//! increments. Each increment prices every [`UnwindStrategy`] without touching
//! the books, then commits the winner. This is a greedy search; it does not
//! promise a globally optimal unwind.
//!
//! # Examples
//!
//! ```
//! use depthgauge::domain::book::{OutcomeOrderBook, PriceLevel};
//! use depthgauge::domain::market::MarketBounds;
//! use depthgauge::domain::retention::{RetentionCalculator, DEFAULT_SELLING_INCREMENT};
//!
//! let mut books = vec![OutcomeOrderBook::with_levels(
//!     vec![PriceLevel::new(0.5, 5.0)],
//!     vec![PriceLevel::new(0.5, 5.0)],
//! )];
//!
//! let ratio = RetentionCalculator::new()
//!     .retention_ratio(DEFAULT_SELLING_INCREMENT, 5.0, &MarketBounds::unit(), &mut books)
//!     .unwrap();
//! assert!((ratio - 1.0).abs() < 1e-9);
//! ```

use std::iter;

use super::book::{Execution, FillEngine};
use super::error::DomainError;
use super::market::MarketBounds;

/// Complete sets sold per step of the multi-book search.
pub const DEFAULT_SELLING_INCREMENT: f64 = 0.01;

/// Minimum improvement for one strategy to displace another.
pub const DEFAULT_MATERIALITY_EPSILON: f64 = 1e-3;

/// One way to sell an increment of complete sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwindStrategy {
    /// Sell the long leg into book `i` and cover the short leg against its asks.
    Concentrated(usize),
    /// Sell one share of every outcome into that outcome's bids.
    ///
    /// Only the long leg is priced; no short-leg complement is added.
    Spread,
}

/// Greedy retention-ratio search over one or more outcome books.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetentionCalculator {
    materiality_epsilon: f64,
}

impl Default for RetentionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl RetentionCalculator {
    /// Calculator with the default materiality threshold.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            materiality_epsilon: DEFAULT_MATERIALITY_EPSILON,
        }
    }

    /// Calculator with a custom materiality threshold.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEpsilon`] for negative or non-finite values.
    pub fn with_materiality_epsilon(epsilon: f64) -> Result<Self, DomainError> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(DomainError::InvalidEpsilon { epsilon });
        }
        Ok(Self {
            materiality_epsilon: epsilon,
        })
    }

    #[must_use]
    pub const fn materiality_epsilon(&self) -> f64 {
        self.materiality_epsilon
    }

    /// Fraction of `allowance` recovered by unwinding it into `books`.
    ///
    /// The books are consumed: after the call they hold exactly the liquidity
    /// the unwind left behind. Clone them first to keep the originals.
    ///
    /// # Errors
    ///
    /// Rejects empty `books`, a non-positive or non-finite `allowance` or
    /// `selling_increment`, and bounds that do not describe a positive range.
    pub fn retention_ratio<B: FillEngine>(
        &self,
        selling_increment: f64,
        allowance: f64,
        bounds: &MarketBounds,
        books: &mut [B],
    ) -> Result<f64, DomainError> {
        if books.is_empty() {
            return Err(DomainError::EmptyBooks);
        }
        if !allowance.is_finite() || allowance <= 0.0 {
            return Err(DomainError::NonPositiveAllowance { allowance });
        }
        if !selling_increment.is_finite() || selling_increment <= 0.0 {
            return Err(DomainError::NonPositiveIncrement {
                increment: selling_increment,
            });
        }
        MarketBounds::try_new(bounds.min_price(), bounds.max_price())?;

        let mut complete_sets = bounds.complete_sets(allowance);

        if let [book] = books {
            let proceeds = book.close_long(complete_sets, bounds, Execution::Commit)
                + book.close_short(complete_sets, bounds, Execution::Commit);
            return Ok(proceeds / allowance);
        }

        let mut total_proceeds = 0.0;
        while complete_sets > 0.0 {
            let shares = selling_increment.min(complete_sets);
            let Some((strategy, _)) = self.select_strategy(shares, bounds, books) else {
                // Nothing left that pays; the rest of the position is unrecoverable.
                break;
            };
            total_proceeds += execute(strategy, shares, bounds, books, Execution::Commit);
            complete_sets -= shares;
        }

        Ok(total_proceeds / allowance)
    }

    /// Price every strategy for `shares` without mutating `books`.
    ///
    /// Candidates are tried in order: each concentrated strategy by book
    /// index, then the spread. The first candidate with positive proceeds is
    /// taken; a later one replaces it only when it is better by more than the
    /// materiality threshold. Returns `None` when no candidate pays anything.
    pub fn select_strategy<B: FillEngine>(
        &self,
        shares: f64,
        bounds: &MarketBounds,
        books: &mut [B],
    ) -> Option<(UnwindStrategy, f64)> {
        let candidates = (0..books.len())
            .map(UnwindStrategy::Concentrated)
            .chain(iter::once(UnwindStrategy::Spread));

        let mut best: Option<(UnwindStrategy, f64)> = None;
        for strategy in candidates {
            let estimate = execute(strategy, shares, bounds, books, Execution::DryRun);
            best = match best {
                None if estimate > 0.0 => Some((strategy, estimate)),
                Some((_, incumbent)) if estimate - incumbent > self.materiality_epsilon => {
                    Some((strategy, estimate))
                }
                keep => keep,
            };
        }
        best
    }
}

fn execute<B: FillEngine>(
    strategy: UnwindStrategy,
    shares: f64,
    bounds: &MarketBounds,
    books: &mut [B],
    mode: Execution,
) -> f64 {
    match strategy {
        UnwindStrategy::Concentrated(index) => books.get_mut(index).map_or(0.0, |book| {
            book.close_long(shares, bounds, mode) + book.close_short(shares, bounds, mode)
        }),
        UnwindStrategy::Spread => books
            .iter_mut()
            .map(|book| book.close_long(shares, bounds, mode))
            .sum(),
    }
}
