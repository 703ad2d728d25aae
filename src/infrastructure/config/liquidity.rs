//! Liquidity engine configuration.

use serde::Deserialize;

use crate::domain::curve::LiquidityProfiler;
use crate::domain::error::DomainError;
use crate::domain::retention::{
    RetentionCalculator, DEFAULT_MATERIALITY_EPSILON, DEFAULT_SELLING_INCREMENT,
};
use crate::domain::tranche::{Tranche, DEFAULT_TRANCHES};

/// Liquidity engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityConfig {
    /// Complete sets sold per step of the multi-book search.
    #[serde(default = "default_selling_increment")]
    pub selling_increment: f64,
    /// Minimum improvement for one unwind strategy to displace another.
    #[serde(default = "default_materiality_epsilon")]
    pub materiality_epsilon: f64,
    /// Capital amounts at which the curve is sampled.
    #[serde(default = "default_tranches")]
    pub tranches: Vec<f64>,
}

const fn default_selling_increment() -> f64 {
    DEFAULT_SELLING_INCREMENT
}

const fn default_materiality_epsilon() -> f64 {
    DEFAULT_MATERIALITY_EPSILON
}

fn default_tranches() -> Vec<f64> {
    DEFAULT_TRANCHES.to_vec()
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            selling_increment: default_selling_increment(),
            materiality_epsilon: default_materiality_epsilon(),
            tranches: default_tranches(),
        }
    }
}

impl LiquidityConfig {
    /// Build the profiler these settings describe.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] for any out-of-range setting.
    pub fn profiler(&self) -> Result<LiquidityProfiler, DomainError> {
        let calculator = RetentionCalculator::with_materiality_epsilon(self.materiality_epsilon)?;
        let tranches = self
            .tranches
            .iter()
            .map(|&amount| Tranche::try_new(amount))
            .collect::<Result<Vec<_>, _>>()?;
        LiquidityProfiler::new(calculator, self.selling_increment, tranches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builds_profiler() {
        let profiler = LiquidityConfig::default().profiler().unwrap();
        assert_eq!(profiler.tranches().len(), DEFAULT_TRANCHES.len());
        assert_eq!(profiler.selling_increment(), DEFAULT_SELLING_INCREMENT);
    }

    #[test]
    fn negative_tranche_fails_profiler() {
        let config = LiquidityConfig {
            tranches: vec![1.0, -2.0],
            ..LiquidityConfig::default()
        };
        assert!(matches!(
            config.profiler(),
            Err(DomainError::NonPositiveAllowance { .. })
        ));
    }
}
