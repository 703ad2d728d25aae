//! Snapshot evaluation: from raw markets to a published summary.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::translate::{translate, TranslatedMarket};
use crate::domain::curve::LiquidityProfiler;
use crate::domain::id::MarketId;
use crate::domain::prediction::predict;
use crate::domain::snapshot::{MarketSnapshot, MarketsSnapshot};
use crate::domain::summary::{MarketSummary, MarketsSummary};
use crate::error::Result;

/// Evaluates every market in a snapshot.
///
/// Synchronous and CPU bound; async callers should run it on a blocking
/// worker.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    profiler: LiquidityProfiler,
    excluded: HashSet<MarketId>,
    featured: HashSet<MarketId>,
}

impl Analyzer {
    pub fn new(profiler: LiquidityProfiler, excluded: impl IntoIterator<Item = MarketId>) -> Self {
        Self {
            profiler,
            excluded: excluded.into_iter().collect(),
            featured: HashSet::new(),
        }
    }

    /// Markets flagged as featured in the published summary.
    #[must_use]
    pub fn with_featured(mut self, featured: impl IntoIterator<Item = MarketId>) -> Self {
        self.featured = featured.into_iter().collect();
        self
    }

    #[must_use]
    pub fn profiler(&self) -> &LiquidityProfiler {
        &self.profiler
    }

    #[must_use]
    pub fn is_excluded(&self, id: &MarketId) -> bool {
        self.excluded.contains(id)
    }

    #[must_use]
    pub fn is_featured(&self, id: &MarketId) -> bool {
        self.featured.contains(id)
    }

    /// Summarize `snapshot`, stamped with the current time.
    #[must_use]
    pub fn summarize(&self, snapshot: &MarketsSnapshot) -> MarketsSummary {
        self.summarize_at(snapshot, Utc::now())
    }

    /// Summarize `snapshot` with an explicit generation time.
    ///
    /// Excluded markets are skipped. A market that fails to evaluate is
    /// logged and left out; the rest of the snapshot is still summarized.
    #[must_use]
    pub fn summarize_at(
        &self,
        snapshot: &MarketsSnapshot,
        generated_at: DateTime<Utc>,
    ) -> MarketsSummary {
        let mut markets = Vec::with_capacity(snapshot.markets.len());
        for market in &snapshot.markets {
            if self.is_excluded(&market.id) {
                info!(market_id = %market.id, name = %market.description, "Skipping excluded market");
                continue;
            }
            match self.summarize_market(market) {
                Ok(summary) => markets.push(summary),
                Err(e) => {
                    warn!(
                        block = snapshot.block,
                        market_id = %market.id,
                        error = %e,
                        "Failed to evaluate market"
                    );
                }
            }
        }

        let summary = MarketsSummary::new(snapshot.block, markets, generated_at);
        info!(
            block = summary.block,
            markets = summary.total_markets,
            skipped = snapshot.markets.len() as u64 - summary.total_markets,
            capitalization = %summary.total_capitalization,
            "Summarized snapshot"
        );
        summary
    }

    /// Evaluate a single market.
    ///
    /// # Errors
    ///
    /// Returns an error if the market cannot be translated or its books
    /// cannot be evaluated.
    #[allow(clippy::result_large_err)]
    pub fn summarize_market(&self, market: &MarketSnapshot) -> Result<MarketSummary> {
        let translated = translate(market)?;
        self.evaluate(translated)
    }

    #[allow(clippy::result_large_err)]
    fn evaluate(&self, market: TranslatedMarket) -> Result<MarketSummary> {
        let books = market.participating_books();
        let liquidity = self.profiler.curve(&market.bounds, &books)?;

        let predictions = match predict(market.kind, &market.bounds, &market.outcomes) {
            Ok(predictions) => predictions,
            Err(e) => {
                error!(market_id = %market.id, error = %e, "Failed to derive predictions");
                Vec::new()
            }
        };

        Ok(MarketSummary {
            is_featured: self.is_featured(&market.id),
            best_bids: market.best_bids(),
            best_asks: market.best_asks(),
            id: market.id,
            kind: market.kind,
            name: market.name,
            category: market.category,
            capitalization: market.capitalization,
            end_time: market.end_time,
            scalar_denomination: market.scalar_denomination,
            metadata: market.metadata,
            predictions,
            liquidity,
        })
    }
}
