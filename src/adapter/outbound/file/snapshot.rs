//! Snapshot source that reads a JSON document from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::snapshot::MarketsSnapshot;
use crate::error::Result;
use crate::port::SnapshotSource;

/// Reads the snapshot file afresh on every fetch.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<MarketsSnapshot> {
        let content = tokio::fs::read(&self.path).await?;
        let snapshot: MarketsSnapshot = serde_json::from_slice(&content)?;
        debug!(
            path = %self.path.display(),
            block = snapshot.block,
            markets = snapshot.markets.len(),
            "Read market snapshot"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
