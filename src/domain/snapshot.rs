//! Raw market snapshot as delivered by a snapshot source.
//!
//! Numbers arrive as decimal strings and are only parsed when a market is
//! translated, so one malformed market never poisons the whole snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{MarketId, OutcomeId};

/// Every market visible at one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketsSnapshot {
    pub block: u64,
    #[serde(default)]
    pub markets: Vec<MarketSnapshot>,
}

/// One market's metadata, outcomes and resting orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub id: MarketId,
    pub market_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub min_price: String,
    pub max_price: String,
    #[serde(default = "default_outstanding_shares")]
    pub outstanding_shares: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar_denomination: Option<String>,
    /// Unix timestamp at which the market stops trading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    #[serde(flatten)]
    pub metadata: MarketMetadata,
    #[serde(default)]
    pub outcomes: Vec<OutcomeSnapshot>,
    #[serde(default)]
    pub orders: BTreeMap<OutcomeId, OutcomeOrders>,
}

/// Descriptive fields passed through to the published summary untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Unix timestamp of market creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_outstanding_shares() -> String {
    "0".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSnapshot {
    pub id: OutcomeId,
    #[serde(default)]
    pub description: String,
    pub volume: String,
    pub price: String,
}

/// Buy and sell orders resting on one outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOrders {
    #[serde(default)]
    pub buy: Vec<RawOrder>,
    #[serde(default)]
    pub sell: Vec<RawOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub order_id: String,
    pub price: String,
    pub amount: String,
    pub state: OrderState,
}

/// Lifecycle state of an order; only open orders rest on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Open,
    Filled,
    Canceled,
}
