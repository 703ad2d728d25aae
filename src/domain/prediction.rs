//! Implied predictions from last-traded outcome prices.
//!
//! An outcome that has never traded carries no information, so a market with
//! no volume on any outcome yields no predictions at all. For two-outcome
//! markets, when only the complementary outcome has traded, its price is
//! reflected across the market's range.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::OutcomeId;
use super::market::{MarketBounds, MarketKind};

/// Last-traded state of one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeQuote {
    pub id: OutcomeId,
    pub description: String,
    pub volume: f64,
    pub price: f64,
}

impl OutcomeQuote {
    fn has_volume(&self) -> bool {
        self.volume > 0.0
    }
}

/// A market's implied forecast for one outcome.
///
/// Yes/no and categorical predictions carry a `percent`; scalar predictions
/// carry a `value` in the market's own units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub outcome_id: OutcomeId,
}

/// Derives the predictions for a market from its outcome quotes.
///
/// # Errors
///
/// Returns [`DomainError::OutcomeCount`] when a yes/no market lacks its
/// "no" or "yes" outcome, or a scalar market does not have exactly two.
pub fn predict(
    kind: MarketKind,
    bounds: &MarketBounds,
    outcomes: &[OutcomeQuote],
) -> Result<Vec<Prediction>, DomainError> {
    match kind {
        MarketKind::YesNo => predict_yes_no(outcomes),
        MarketKind::Categorical => Ok(predict_categorical(outcomes)),
        MarketKind::Scalar => predict_scalar(bounds, outcomes),
    }
}

fn predict_yes_no(outcomes: &[OutcomeQuote]) -> Result<Vec<Prediction>, DomainError> {
    let find = |id: u64| outcomes.iter().find(|o| o.id == OutcomeId::new(id));
    let (Some(no), Some(yes)) = (find(0), find(1)) else {
        return Err(DomainError::OutcomeCount {
            kind: MarketKind::YesNo,
            expected: 2,
            actual: outcomes.len(),
        });
    };

    if !no.has_volume() && !yes.has_volume() {
        return Ok(Vec::new());
    }

    let probability = if !yes.has_volume() && no.has_volume() {
        1.0 - no.price
    } else {
        yes.price
    };

    Ok(vec![Prediction {
        name: "yes".to_string(),
        percent: Some(probability * 100.0),
        value: None,
        outcome_id: OutcomeId::UPPER,
    }])
}

fn predict_categorical(outcomes: &[OutcomeQuote]) -> Vec<Prediction> {
    if !outcomes.iter().any(OutcomeQuote::has_volume) {
        return Vec::new();
    }

    let mut ranked: Vec<&OutcomeQuote> = outcomes.iter().collect();
    ranked.sort_by(|a, b| b.price.total_cmp(&a.price));
    ranked
        .into_iter()
        .map(|outcome| Prediction {
            name: outcome.description.clone(),
            percent: Some(outcome.price * 100.0),
            value: None,
            outcome_id: outcome.id,
        })
        .collect()
}

fn predict_scalar(
    bounds: &MarketBounds,
    outcomes: &[OutcomeQuote],
) -> Result<Vec<Prediction>, DomainError> {
    let [lower, upper] = outcomes else {
        return Err(DomainError::OutcomeCount {
            kind: MarketKind::Scalar,
            expected: 2,
            actual: outcomes.len(),
        });
    };

    if !lower.has_volume() && !upper.has_volume() {
        return Ok(Vec::new());
    }

    let value = if !upper.has_volume() && lower.has_volume() {
        bounds.max_price() + bounds.min_price() - lower.price
    } else {
        upper.price
    };

    Ok(vec![Prediction {
        name: String::new(),
        percent: None,
        value: Some(value),
        outcome_id: OutcomeId::UPPER,
    }])
}
