//! Polling loop that turns new snapshots into published summaries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tracing::{debug, error, info};

use super::analyzer::Analyzer;
use super::debug::log_debug_markets;
use crate::domain::id::MarketId;
use crate::domain::summary::MarketsSummary;
use crate::error::Result;
use crate::port::{SnapshotSource, SummaryWriter};

/// What a single poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new block was summarized and published.
    Processed { block: u64, markets: u64 },
    /// The snapshot was not newer than the last published block.
    Skipped { block: u64 },
}

/// Watches a snapshot source and publishes a summary for every new block.
pub struct Watcher {
    source: Arc<dyn SnapshotSource>,
    writer: Arc<dyn SummaryWriter>,
    analyzer: Arc<Analyzer>,
    poll_interval: Duration,
    debug_markets: Vec<MarketId>,
    last_block: Mutex<Option<u64>>,
    latest: RwLock<Option<Arc<MarketsSummary>>>,
}

impl Watcher {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        writer: Arc<dyn SummaryWriter>,
        analyzer: Analyzer,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            writer,
            analyzer: Arc::new(analyzer),
            poll_interval,
            debug_markets: Vec::new(),
            last_block: Mutex::new(None),
            latest: RwLock::new(None),
        }
    }

    /// Markets whose inputs and outputs are logged on every new block.
    #[must_use]
    pub fn with_debug_markets(mut self, ids: Vec<MarketId>) -> Self {
        self.debug_markets = ids;
        self
    }

    /// Most recent summary, if any block has been evaluated.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<MarketsSummary>> {
        self.latest.read().clone()
    }

    /// Last block that was successfully published.
    #[must_use]
    pub fn last_block(&self) -> Option<u64> {
        *self.last_block.lock()
    }

    /// Fetch, evaluate and publish once.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be fetched, the evaluation
    /// task fails or the summary cannot be written. A failed write leaves the
    /// block unpublished, so the next poll retries it.
    pub async fn poll_once(&self) -> Result<PollOutcome> {
        let snapshot = self.source.fetch().await?;
        let block = snapshot.block;

        if self.last_block().is_some_and(|last| block <= last) {
            debug!(block, "Snapshot is not newer than last processed block");
            return Ok(PollOutcome::Skipped { block });
        }

        info!(block, markets = snapshot.markets.len(), "Processing new block");

        let analyzer = Arc::clone(&self.analyzer);
        let (snapshot, summary) = tokio::task::spawn_blocking(move || {
            let summary = analyzer.summarize(&snapshot);
            (snapshot, summary)
        })
        .await?;

        if !self.debug_markets.is_empty() {
            log_debug_markets(&self.debug_markets, &snapshot, &summary);
        }

        let summary = Arc::new(summary);
        *self.latest.write() = Some(Arc::clone(&summary));

        self.writer.write(&summary).await?;
        *self.last_block.lock() = Some(block);

        info!(block, markets = summary.total_markets, "Finished processing block");
        Ok(PollOutcome::Processed {
            block,
            markets: summary.total_markets,
        })
    }

    /// Poll until shutdown is signalled.
    ///
    /// Failures are logged and the loop carries on with the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(
            source = %self.source.describe(),
            interval_secs = self.poll_interval.as_secs(),
            "Starting watcher"
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(_) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = interval.tick() => {
                    if let Err(e) = self.poll_once().await {
                        error!(error = %e, "Processing snapshot failed");
                    }
                }
            }
        }

        Ok(())
    }
}
