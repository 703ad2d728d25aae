//! Capital tranches at which a liquidity curve is sampled.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Default sampling points, in settlement currency.
pub const DEFAULT_TRANCHES: [f64; 7] = [0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0];

/// A positive amount of capital to unwind.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tranche(f64);

impl Tranche {
    /// Creates a tranche.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveAllowance`] for zero, negative or
    /// non-finite amounts.
    pub fn try_new(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::NonPositiveAllowance { allowance: amount });
        }
        Ok(Self(amount))
    }

    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// The default tranche ladder.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_TRANCHES.iter().map(|&amount| Self(amount)).collect()
    }
}

impl TryFrom<f64> for Tranche {
    type Error = DomainError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::try_new(amount)
    }
}

impl From<Tranche> for f64 {
    fn from(tranche: Tranche) -> Self {
        tranche.0
    }
}

impl fmt::Display for Tranche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
