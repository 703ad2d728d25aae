use depthgauge::domain::{OutcomeOrderBook, PriceLevel};

/// Build a book from `(price, amount)` pairs, best level first.
pub fn book(bids: &[(f64, f64)], asks: &[(f64, f64)]) -> OutcomeOrderBook {
    let levels = |pairs: &[(f64, f64)]| {
        pairs
            .iter()
            .map(|&(price, amount)| PriceLevel::new(price, amount))
            .collect()
    };
    OutcomeOrderBook::with_levels(levels(bids), levels(asks))
}

pub fn assert_near(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
