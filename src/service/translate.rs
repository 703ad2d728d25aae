//! Translation of raw snapshot markets into engine inputs.
//!
//! Only open orders rest on a book. Orders at the same decimal price merge
//! into one level before anything is converted to `f64`, so aggregation is
//! exact.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::book::{OutcomeOrderBook, PriceLevel};
use crate::domain::id::{MarketId, OutcomeId};
use crate::domain::market::{MarketBounds, MarketKind};
use crate::domain::prediction::OutcomeQuote;
use crate::domain::snapshot::{MarketMetadata, MarketSnapshot, OrderState, RawOrder};
use crate::error::{Result, SnapshotError};

/// Which side of the book a set of orders rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Buy orders, best (highest) price first.
    Bid,
    /// Sell orders, best (lowest) price first.
    Ask,
}

/// A market with every number parsed and every book built.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedMarket {
    pub id: MarketId,
    pub kind: MarketKind,
    pub name: String,
    pub category: Option<String>,
    pub capitalization: Decimal,
    pub end_time: Option<u64>,
    pub scalar_denomination: Option<String>,
    pub metadata: MarketMetadata,
    pub bounds: MarketBounds,
    /// Outcomes ascending by id.
    pub outcomes: Vec<OutcomeQuote>,
    /// One book per outcome that has orders.
    pub books: BTreeMap<OutcomeId, OutcomeOrderBook>,
}

impl TranslatedMarket {
    /// The books the retention engine evaluates, in order.
    ///
    /// Yes/no and scalar markets trade through their upper outcome alone.
    /// Categorical markets use every listed outcome; an outcome without
    /// orders contributes an empty book.
    #[must_use]
    pub fn participating_books(&self) -> Vec<OutcomeOrderBook> {
        let book_for = |id: OutcomeId| self.books.get(&id).cloned().unwrap_or_default();
        match self.kind {
            MarketKind::YesNo | MarketKind::Scalar => vec![book_for(OutcomeId::UPPER)],
            MarketKind::Categorical => self.outcomes.iter().map(|o| book_for(o.id)).collect(),
        }
    }

    /// Best bid of every outcome that has one.
    #[must_use]
    pub fn best_bids(&self) -> BTreeMap<OutcomeId, PriceLevel> {
        self.books
            .iter()
            .filter_map(|(id, book)| book.best_bid().map(|level| (*id, *level)))
            .collect()
    }

    /// Best ask of every outcome that has one.
    #[must_use]
    pub fn best_asks(&self) -> BTreeMap<OutcomeId, PriceLevel> {
        self.books
            .iter()
            .filter_map(|(id, book)| book.best_ask().map(|level| (*id, *level)))
            .collect()
    }
}

/// Parse and validate one snapshot market.
///
/// # Errors
///
/// Returns [`SnapshotError`] for an unknown market type or a malformed
/// number, and a domain error for scalar bounds that do not form a range.
#[allow(clippy::result_large_err)]
pub fn translate(market: &MarketSnapshot) -> Result<TranslatedMarket> {
    let id = &market.id;
    let kind = MarketKind::from_str(&market.market_type).map_err(|market_type| {
        SnapshotError::UnknownMarketType {
            market_id: id.to_string(),
            market_type,
        }
    })?;

    let bounds = match kind {
        MarketKind::YesNo | MarketKind::Categorical => MarketBounds::unit(),
        MarketKind::Scalar => MarketBounds::try_new(
            parse_f64(id, "min_price", &market.min_price)?,
            parse_f64(id, "max_price", &market.max_price)?,
        )?,
    };

    let capitalization = parse_decimal(id, "outstanding_shares", &market.outstanding_shares)?;

    let mut outcomes = market
        .outcomes
        .iter()
        .map(|outcome| {
            Ok(OutcomeQuote {
                id: outcome.id,
                description: outcome.description.clone(),
                volume: parse_f64(id, "volume", &outcome.volume)?,
                price: parse_f64(id, "price", &outcome.price)?,
            })
        })
        .collect::<std::result::Result<Vec<_>, SnapshotError>>()?;
    outcomes.sort_by_key(|outcome| outcome.id);

    let mut books = BTreeMap::new();
    for (outcome_id, orders) in &market.orders {
        let bids = aggregate_levels(id, &orders.buy, Side::Bid)?;
        let asks = aggregate_levels(id, &orders.sell, Side::Ask)?;
        books.insert(*outcome_id, OutcomeOrderBook::with_levels(bids, asks));
    }

    Ok(TranslatedMarket {
        id: id.clone(),
        kind,
        name: market.description.clone(),
        category: market.category.clone(),
        capitalization,
        end_time: market.end_time,
        scalar_denomination: market.scalar_denomination.clone(),
        metadata: market.metadata.clone(),
        bounds,
        outcomes,
        books,
    })
}

/// Merge open orders into best-first price levels.
///
/// # Errors
///
/// Returns [`SnapshotError::InvalidNumber`] if an open order's price or
/// amount does not parse.
pub fn aggregate_levels(
    market_id: &MarketId,
    orders: &[RawOrder],
    side: Side,
) -> std::result::Result<Vec<PriceLevel>, SnapshotError> {
    let mut by_price: BTreeMap<Decimal, Decimal> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.state == OrderState::Open) {
        let price = parse_decimal(market_id, "order price", &order.price)?;
        let amount = parse_decimal(market_id, "order amount", &order.amount)?;
        *by_price.entry(price).or_default() += amount;
    }

    let resting = by_price.into_iter().filter(|(_, amount)| *amount > Decimal::ZERO);
    let ordered: Vec<(Decimal, Decimal)> = match side {
        Side::Bid => resting.rev().collect(),
        Side::Ask => resting.collect(),
    };

    ordered
        .into_iter()
        .map(|(price, amount)| {
            Ok(PriceLevel::new(
                to_f64(market_id, "order price", price)?,
                to_f64(market_id, "order amount", amount)?,
            ))
        })
        .collect()
}

fn parse_decimal(
    market_id: &MarketId,
    field: &'static str,
    raw: &str,
) -> std::result::Result<Decimal, SnapshotError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid_number(market_id, field, raw))
}

fn parse_f64(
    market_id: &MarketId,
    field: &'static str,
    raw: &str,
) -> std::result::Result<f64, SnapshotError> {
    let value = parse_decimal(market_id, field, raw)?;
    to_f64(market_id, field, value)
}

fn to_f64(
    market_id: &MarketId,
    field: &'static str,
    value: Decimal,
) -> std::result::Result<f64, SnapshotError> {
    value
        .to_f64()
        .ok_or_else(|| invalid_number(market_id, field, &value.to_string()))
}

fn invalid_number(market_id: &MarketId, field: &'static str, raw: &str) -> SnapshotError {
    SnapshotError::InvalidNumber {
        market_id: market_id.to_string(),
        field,
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::{OutcomeOrders, OutcomeSnapshot};
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn order(id: &str, price: &str, amount: &str, state: OrderState) -> RawOrder {
        RawOrder {
            order_id: id.to_string(),
            price: price.to_string(),
            amount: amount.to_string(),
            state,
        }
    }

    fn market(kind: &str) -> MarketSnapshot {
        MarketSnapshot {
            id: MarketId::from("0xabc"),
            market_type: kind.to_string(),
            description: "Will it rain?".to_string(),
            category: None,
            min_price: "0".to_string(),
            max_price: "1".to_string(),
            outstanding_shares: "12.5".to_string(),
            scalar_denomination: None,
            end_time: Some(1_700_000_000),
            metadata: MarketMetadata::default(),
            outcomes: vec![
                OutcomeSnapshot {
                    id: OutcomeId::new(1),
                    description: "Yes".to_string(),
                    volume: "3".to_string(),
                    price: "0.6".to_string(),
                },
                OutcomeSnapshot {
                    id: OutcomeId::new(0),
                    description: "No".to_string(),
                    volume: "2".to_string(),
                    price: "0.4".to_string(),
                },
            ],
            orders: BTreeMap::new(),
        }
    }

    #[test]
    fn aggregates_open_orders_at_equal_price() {
        let orders = vec![
            order("a", "0.9", "10", OrderState::Open),
            order("b", "0.90", "10", OrderState::Open),
            order("c", "0.8", "5", OrderState::Open),
            order("d", "0.95", "7", OrderState::Canceled),
            order("e", "0.85", "7", OrderState::Filled),
        ];
        let levels = aggregate_levels(&MarketId::from("m"), &orders, Side::Bid).unwrap();
        assert_eq!(
            levels,
            vec![PriceLevel::new(0.9, 20.0), PriceLevel::new(0.8, 5.0)]
        );
    }

    #[test]
    fn asks_are_sorted_lowest_first() {
        let orders = vec![
            order("a", "0.7", "1", OrderState::Open),
            order("b", "0.6", "2", OrderState::Open),
            order("c", "0.65", "0", OrderState::Open),
        ];
        let levels = aggregate_levels(&MarketId::from("m"), &orders, Side::Ask).unwrap();
        assert_eq!(
            levels,
            vec![PriceLevel::new(0.6, 2.0), PriceLevel::new(0.7, 1.0)]
        );
    }

    #[test]
    fn malformed_open_order_names_market_and_field() {
        let orders = vec![order("a", "abc", "1", OrderState::Open)];
        let err = aggregate_levels(&MarketId::from("0xm"), &orders, Side::Bid).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::InvalidNumber {
                market_id: "0xm".to_string(),
                field: "order price",
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn malformed_closed_orders_are_ignored() {
        let orders = vec![order("a", "abc", "1", OrderState::Filled)];
        let levels = aggregate_levels(&MarketId::from("m"), &orders, Side::Bid).unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn yes_no_market_trades_through_upper_outcome() {
        let mut snapshot = market("yesNo");
        snapshot.orders.insert(
            OutcomeId::new(1),
            OutcomeOrders {
                buy: vec![order("a", "0.55", "4", OrderState::Open)],
                sell: vec![order("b", "0.65", "3", OrderState::Open)],
            },
        );
        snapshot.orders.insert(
            OutcomeId::new(0),
            OutcomeOrders {
                buy: vec![order("c", "0.3", "1", OrderState::Open)],
                sell: vec![],
            },
        );

        let translated = translate(&snapshot).unwrap();
        assert_eq!(translated.kind, MarketKind::YesNo);
        assert_eq!(translated.bounds, MarketBounds::unit());
        assert_eq!(translated.capitalization, dec!(12.5));
        assert_eq!(translated.outcomes[0].id, OutcomeId::new(0));

        let books = translated.participating_books();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].best_bid(), Some(&PriceLevel::new(0.55, 4.0)));

        assert_eq!(translated.best_bids().len(), 2);
        assert_eq!(translated.best_asks().len(), 1);
    }

    #[test]
    fn yes_no_without_orders_gets_an_empty_book() {
        let translated = translate(&market("yesno")).unwrap();
        let books = translated.participating_books();
        assert_eq!(books.len(), 1);
        assert!(books[0].is_empty());
    }

    #[test]
    fn categorical_market_uses_every_outcome() {
        let mut snapshot = market("categorical");
        snapshot.outcomes.push(OutcomeSnapshot {
            id: OutcomeId::new(2),
            description: "Maybe".to_string(),
            volume: "0".to_string(),
            price: "0".to_string(),
        });
        snapshot.orders.insert(
            OutcomeId::new(2),
            OutcomeOrders {
                buy: vec![order("a", "0.1", "4", OrderState::Open)],
                sell: vec![],
            },
        );

        let books = translate(&snapshot).unwrap().participating_books();
        assert_eq!(books.len(), 3);
        assert!(books[0].is_empty());
        assert!(books[1].is_empty());
        assert_eq!(books[2].best_bid(), Some(&PriceLevel::new(0.1, 4.0)));
    }

    #[test]
    fn scalar_market_uses_parsed_bounds() {
        let mut snapshot = market("scalar");
        snapshot.min_price = "-10".to_string();
        snapshot.max_price = "1e2".to_string();
        let translated = translate(&snapshot).unwrap();
        assert_eq!(translated.bounds, MarketBounds::try_new(-10.0, 100.0).unwrap());
    }

    #[test]
    fn scalar_market_with_inverted_bounds_is_rejected() {
        let mut snapshot = market("scalar");
        snapshot.min_price = "5".to_string();
        snapshot.max_price = "5".to_string();
        assert!(matches!(translate(&snapshot), Err(Error::Domain(_))));
    }

    #[test]
    fn unknown_market_type_is_rejected() {
        let result = translate(&market("binary"));
        assert!(matches!(
            result,
            Err(Error::Snapshot(SnapshotError::UnknownMarketType { .. }))
        ));
    }

    #[test]
    fn malformed_outstanding_shares_is_rejected() {
        let mut snapshot = market("yesNo");
        snapshot.outstanding_shares = "lots".to_string();
        assert!(matches!(
            translate(&snapshot),
            Err(Error::Snapshot(SnapshotError::InvalidNumber {
                field: "outstanding_shares",
                ..
            }))
        ));
    }
}
