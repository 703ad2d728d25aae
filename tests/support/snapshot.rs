use std::path::Path;

use serde_json::{json, Value};

fn open_order(id: &str, price: &str, amount: &str) -> Value {
    json!({ "order_id": id, "price": price, "amount": amount, "state": "open" })
}

/// Yes/no market with a single resting bid and ask on the upper outcome.
pub fn yes_no_market(id: &str, outstanding: &str, bid: &str, ask: &str) -> Value {
    json!({
        "id": id,
        "market_type": "yesNo",
        "description": format!("Will {id} resolve yes?"),
        "category": "test",
        "min_price": "0",
        "max_price": "1",
        "outstanding_shares": outstanding,
        "outcomes": [
            { "id": 0, "description": "No", "volume": "10", "price": "0.4" },
            { "id": 1, "description": "Yes", "volume": "20", "price": "0.6" }
        ],
        "orders": {
            "1": {
                "buy": [open_order(&format!("{id}-b"), bid, "100")],
                "sell": [open_order(&format!("{id}-s"), ask, "100")]
            }
        }
    })
}

/// Categorical market whose outcomes each have one bid sized for a full unwind.
pub fn categorical_market(id: &str, outstanding: &str, bids: &[&str]) -> Value {
    let outcomes: Vec<Value> = bids
        .iter()
        .enumerate()
        .map(|(i, price)| {
            json!({ "id": i, "description": format!("Outcome {i}"), "volume": "1", "price": price })
        })
        .collect();
    let mut orders = serde_json::Map::new();
    for (i, price) in bids.iter().enumerate() {
        orders.insert(
            i.to_string(),
            json!({ "buy": [open_order(&format!("{id}-{i}"), price, "100")], "sell": [] }),
        );
    }
    json!({
        "id": id,
        "market_type": "categorical",
        "description": format!("Which outcome wins {id}?"),
        "min_price": "0",
        "max_price": "1",
        "outstanding_shares": outstanding,
        "outcomes": outcomes,
        "orders": orders
    })
}

pub fn snapshot(block: u64, markets: Vec<Value>) -> Value {
    json!({ "block": block, "markets": markets })
}

pub fn write_snapshot(path: &Path, snapshot: &Value) {
    std::fs::write(path, serde_json::to_vec_pretty(snapshot).expect("serialize snapshot"))
        .expect("write snapshot");
}
