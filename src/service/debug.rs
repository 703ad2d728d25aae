//! Detailed logging of selected markets' inputs and outputs.

use tracing::warn;

use crate::domain::id::MarketId;
use crate::domain::snapshot::{MarketSnapshot, MarketsSnapshot};
use crate::domain::summary::{MarketSummary, MarketsSummary};

/// Log what went into and came out of each market in `ids`.
///
/// Logged at warn level so the detail survives a quiet production filter.
pub fn log_debug_markets(ids: &[MarketId], snapshot: &MarketsSnapshot, summary: &MarketsSummary) {
    for id in ids {
        warn!(market_id = %id, block = snapshot.block, "--- Market debug information ---");

        match snapshot.markets.iter().find(|m| &m.id == id) {
            Some(input) => log_input(input),
            None => warn!(market_id = %id, "Input market data not found while debugging"),
        }

        match summary.market(id) {
            Some(output) => log_output(output),
            None => warn!(market_id = %id, "Output market data not found while debugging"),
        }
    }
}

fn log_input(market: &MarketSnapshot) {
    let id = &market.id;
    warn!(
        market_id = %id,
        market_type = %market.market_type,
        description = %market.description,
        outstanding_shares = %market.outstanding_shares,
        min_price = %market.min_price,
        max_price = %market.max_price,
        "Input data for market"
    );

    for outcome in &market.outcomes {
        warn!(
            market_id = %id,
            outcome_id = %outcome.id,
            volume = %outcome.volume,
            price = %outcome.price,
            description = %outcome.description,
            "Outcome info"
        );
    }

    if market.orders.is_empty() {
        warn!(market_id = %id, "No orders for market");
    }
    for (outcome_id, orders) in &market.orders {
        for (side, list) in [("buy", &orders.buy), ("sell", &orders.sell)] {
            if list.is_empty() {
                warn!(market_id = %id, outcome_id = %outcome_id, side, "No orders for market outcome");
            }
            for order in list {
                warn!(
                    market_id = %id,
                    outcome_id = %outcome_id,
                    side,
                    order_id = %order.order_id,
                    price = %order.price,
                    amount = %order.amount,
                    state = ?order.state,
                    "Order for market outcome"
                );
            }
        }
    }
}

fn log_output(market: &MarketSummary) {
    let id = &market.id;
    warn!(market_id = %id, capitalization = %market.capitalization, "Output data for market");

    for (side, levels) in [("bid", &market.best_bids), ("ask", &market.best_asks)] {
        if levels.is_empty() {
            warn!(market_id = %id, side, "No best level for market");
        }
        for (outcome_id, level) in levels {
            warn!(
                market_id = %id,
                outcome_id = %outcome_id,
                side,
                price = level.price(),
                amount = level.amount(),
                "Best level for market outcome"
            );
        }
    }

    for point in market.liquidity.points() {
        warn!(
            market_id = %id,
            tranche = point.tranche.amount(),
            retention_ratio = point.retention_ratio,
            "Liquidity retention"
        );
    }

    if market.predictions.is_empty() {
        warn!(market_id = %id, "No predictions for market");
    }
    for prediction in &market.predictions {
        warn!(
            market_id = %id,
            outcome_id = %prediction.outcome_id,
            name = %prediction.name,
            percent = ?prediction.percent,
            value = ?prediction.value,
            "Prediction for outcome"
        );
    }
}
