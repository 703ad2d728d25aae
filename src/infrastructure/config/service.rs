//! Service configuration for snapshot input, summary output and market lists.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::id::MarketId;

/// Where snapshots are read from and how often.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Snapshot JSON file. Overridden by `DEPTHGAUGE_SNAPSHOT_PATH`.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    /// Seconds between polls (default: 15).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("snapshot.json")
}

const fn default_poll_interval_secs() -> u64 {
    15
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Where summaries are published.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Summary JSON file. Overridden by `DEPTHGAUGE_SUMMARY_PATH`.
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,
}

fn default_summary_path() -> PathBuf {
    PathBuf::from("markets.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: default_summary_path(),
        }
    }
}

/// Per-market handling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketsConfig {
    /// Markets left out of every summary.
    #[serde(default)]
    pub excluded: Vec<MarketId>,
    /// Markets flagged as featured in the published summary.
    #[serde(default)]
    pub featured: Vec<MarketId>,
    /// Markets whose inputs and outputs are logged in detail.
    /// Overridden by `DEPTHGAUGE_DEBUG_MARKETS` (comma separated).
    #[serde(default)]
    pub debug: Vec<MarketId>,
}
