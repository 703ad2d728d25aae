//! Evaluated markets, ready to publish.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::book::PriceLevel;
use super::curve::LiquidityCurve;
use super::id::{MarketId, OutcomeId};
use super::market::MarketKind;
use super::prediction::Prediction;
use super::snapshot::MarketMetadata;

/// One market's published view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub id: MarketId,
    pub kind: MarketKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Outstanding shares, in settlement currency.
    pub capitalization: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar_denomination: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(flatten)]
    pub metadata: MarketMetadata,
    pub predictions: Vec<Prediction>,
    pub best_bids: BTreeMap<OutcomeId, PriceLevel>,
    pub best_asks: BTreeMap<OutcomeId, PriceLevel>,
    pub liquidity: LiquidityCurve,
}

/// Every evaluated market at one block, largest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketsSummary {
    pub block: u64,
    pub total_markets: u64,
    pub total_capitalization: Decimal,
    pub generated_at: DateTime<Utc>,
    pub markets: Vec<MarketSummary>,
}

impl MarketsSummary {
    /// Assembles a summary, ordering markets by capitalization descending.
    #[must_use]
    pub fn new(block: u64, mut markets: Vec<MarketSummary>, generated_at: DateTime<Utc>) -> Self {
        markets.sort_by(|a, b| b.capitalization.cmp(&a.capitalization));
        let total_capitalization = markets.iter().map(|m| m.capitalization).sum();
        Self {
            block,
            total_markets: markets.len() as u64,
            total_capitalization,
            generated_at,
            markets,
        }
    }

    /// Looks up a market by id.
    #[must_use]
    pub fn market(&self, id: &MarketId) -> Option<&MarketSummary> {
        self.markets.iter().find(|m| &m.id == id)
    }
}
