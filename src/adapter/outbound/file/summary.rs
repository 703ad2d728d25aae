//! Summary writer that publishes pretty JSON to disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::summary::MarketsSummary;
use crate::error::Result;
use crate::port::SummaryWriter;

/// Writes each summary over the previous one.
///
/// Readers never observe a half-written file: the summary is written to a
/// sibling temp file which is then renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SummaryWriter for JsonFileWriter {
    async fn write(&self, summary: &MarketsSummary) -> Result<()> {
        let json = serde_json::to_vec_pretty(summary)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("tmp");
        if let Err(e) = fs::write(&temp_path, &json).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            block = summary.block,
            bytes = json.len(),
            "Wrote markets summary"
        );
        Ok(())
    }
}
