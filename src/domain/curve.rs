//! Liquidity curves: retention sampled across capital tranches.

use serde::{Deserialize, Serialize};

use super::book::FillEngine;
use super::error::DomainError;
use super::market::MarketBounds;
use super::retention::{RetentionCalculator, DEFAULT_SELLING_INCREMENT};
use super::tranche::Tranche;

/// Retention at one tranche.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub tranche: Tranche,
    pub retention_ratio: f64,
}

/// Retention ratios in tranche order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiquidityCurve(Vec<CurvePoint>);

impl LiquidityCurve {
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.0
    }

    /// Ratio recorded for `amount`, if that tranche was sampled.
    #[must_use]
    pub fn ratio_at(&self, amount: f64) -> Option<f64> {
        self.0
            .iter()
            .find(|point| point.tranche.amount() == amount)
            .map(|point| point.retention_ratio)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Evaluates a [`RetentionCalculator`] once per tranche.
///
/// Each tranche runs against its own deep copy of the books, so the
/// caller's books are never touched and tranches never see each other's
/// fills.
#[derive(Debug, Clone)]
pub struct LiquidityProfiler {
    calculator: RetentionCalculator,
    selling_increment: f64,
    tranches: Vec<Tranche>,
}

impl Default for LiquidityProfiler {
    fn default() -> Self {
        Self {
            calculator: RetentionCalculator::new(),
            selling_increment: DEFAULT_SELLING_INCREMENT,
            tranches: Tranche::defaults(),
        }
    }
}

impl LiquidityProfiler {
    /// Creates a profiler.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveIncrement`] for a zero, negative or
    /// non-finite increment.
    pub fn new(
        calculator: RetentionCalculator,
        selling_increment: f64,
        tranches: Vec<Tranche>,
    ) -> Result<Self, DomainError> {
        if !selling_increment.is_finite() || selling_increment <= 0.0 {
            return Err(DomainError::NonPositiveIncrement {
                increment: selling_increment,
            });
        }
        Ok(Self {
            calculator,
            selling_increment,
            tranches,
        })
    }

    #[must_use]
    pub fn tranches(&self) -> &[Tranche] {
        &self.tranches
    }

    #[must_use]
    pub const fn selling_increment(&self) -> f64 {
        self.selling_increment
    }

    /// Samples the retention ratio at every tranche.
    ///
    /// # Errors
    ///
    /// Propagates the calculator's precondition errors, e.g. for empty `books`.
    pub fn curve<B: FillEngine>(
        &self,
        bounds: &MarketBounds,
        books: &[B],
    ) -> Result<LiquidityCurve, DomainError> {
        let mut points = Vec::with_capacity(self.tranches.len());
        for &tranche in &self.tranches {
            let mut working: Vec<B> = books.iter().map(B::deep_clone).collect();
            let retention_ratio = self.calculator.retention_ratio(
                self.selling_increment,
                tranche.amount(),
                bounds,
                &mut working,
            )?;
            points.push(CurvePoint {
                tranche,
                retention_ratio,
            });
        }
        Ok(LiquidityCurve(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{OutcomeOrderBook, PriceLevel};

    fn thinning_book() -> OutcomeOrderBook {
        OutcomeOrderBook::with_levels(
            vec![
                PriceLevel::new(0.5, 1.0),
                PriceLevel::new(0.4, 2.0),
                PriceLevel::new(0.2, 5.0),
            ],
            vec![PriceLevel::new(0.55, 1.0), PriceLevel::new(0.7, 4.0)],
        )
    }

    #[test]
    fn curve_is_non_increasing_with_finite_depth() {
        let books = vec![thinning_book()];
        let curve = LiquidityProfiler::default()
            .curve(&MarketBounds::unit(), &books)
            .unwrap();

        assert_eq!(curve.len(), Tranche::defaults().len());
        for pair in curve.points().windows(2) {
            assert!(
                pair[1].retention_ratio <= pair[0].retention_ratio + 1e-12,
                "{pair:?}"
            );
        }
    }

    #[test]
    fn curve_leaves_caller_books_untouched() {
        let books = vec![thinning_book(), thinning_book()];
        let before = books.clone();
        LiquidityProfiler::default()
            .curve(&MarketBounds::unit(), &books)
            .unwrap();
        assert_eq!(books, before);
    }

    #[test]
    fn tranches_are_evaluated_independently() {
        let books = vec![thinning_book()];
        let one = Tranche::try_new(1.0).unwrap();
        let profiler =
            LiquidityProfiler::new(RetentionCalculator::new(), 0.01, vec![one, one]).unwrap();
        let curve = profiler.curve(&MarketBounds::unit(), &books).unwrap();

        assert_eq!(curve.points()[0], curve.points()[1]);
        assert_eq!(curve.ratio_at(1.0), Some(curve.points()[0].retention_ratio));
        assert_eq!(curve.ratio_at(3.0), None);
    }

    #[test]
    fn empty_book_set_is_rejected() {
        let books: Vec<OutcomeOrderBook> = vec![];
        let result = LiquidityProfiler::default().curve(&MarketBounds::unit(), &books);
        assert_eq!(result, Err(DomainError::EmptyBooks));
    }

    #[test]
    fn rejects_non_positive_increment() {
        let result = LiquidityProfiler::new(RetentionCalculator::new(), 0.0, Tranche::defaults());
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveIncrement { .. })
        ));
    }
}
