//! Market snapshot source port.

use async_trait::async_trait;

use crate::domain::snapshot::MarketsSnapshot;
use crate::error::Result;

/// Port for fetching the current state of every market.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or decoded.
    async fn fetch(&self) -> Result<MarketsSnapshot>;

    /// Human-readable description of where snapshots come from.
    fn describe(&self) -> String;
}
