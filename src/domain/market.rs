//! Market kinds and price bounds.
//!
//! - [`MarketKind`] - Yes/no, scalar or categorical
//! - [`MarketBounds`] - The price range outcome shares trade within
//!
//! A complete set (one share of every outcome) always settles for
//! `max_price - min_price`, which is how capital converts into shares.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// The shape of a prediction market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarketKind {
    /// Two outcomes, "no" (0) and "yes" (1), priced in [0, 1].
    YesNo,
    /// Two outcomes, "lower" (0) and "upper" (1), priced in an arbitrary range.
    Scalar,
    /// Any number of mutually exclusive outcomes, each priced in [0, 1].
    Categorical,
}

impl MarketKind {
    /// Wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YesNo => "yesNo",
            Self::Scalar => "scalar",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yesno" | "yes_no" => Ok(Self::YesNo),
            "scalar" => Ok(Self::Scalar),
            "categorical" => Ok(Self::Categorical),
            _ => Err(s.to_string()),
        }
    }
}

/// Price range of a market's outcome shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketBounds {
    min_price: f64,
    max_price: f64,
}

impl MarketBounds {
    /// Creates bounds, rejecting empty or non-finite ranges.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBounds`] unless both prices are finite
    /// and `max_price > min_price`.
    pub fn try_new(min_price: f64, max_price: f64) -> Result<Self, DomainError> {
        if !min_price.is_finite() || !max_price.is_finite() || max_price <= min_price {
            return Err(DomainError::InvalidBounds {
                min_price,
                max_price,
            });
        }
        Ok(Self {
            min_price,
            max_price,
        })
    }

    /// The [0, 1] range used by yes/no and categorical markets.
    #[must_use]
    pub const fn unit() -> Self {
        Self {
            min_price: 0.0,
            max_price: 1.0,
        }
    }

    #[must_use]
    pub const fn min_price(&self) -> f64 {
        self.min_price
    }

    #[must_use]
    pub const fn max_price(&self) -> f64 {
        self.max_price
    }

    /// Settlement value of one complete set.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max_price - self.min_price
    }

    /// Number of complete sets a capital allowance buys.
    #[must_use]
    pub fn complete_sets(&self, allowance: f64) -> f64 {
        allowance / self.range()
    }

    /// Per-share value of selling a long position at `price`.
    #[must_use]
    pub fn long_value(&self, price: f64) -> f64 {
        price - self.min_price
    }

    /// Per-share value of closing a short position against an ask at `price`.
    #[must_use]
    pub fn short_value(&self, price: f64) -> f64 {
        self.max_price - price
    }
}
