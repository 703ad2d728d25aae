//! Markets summary publication port.

use async_trait::async_trait;

use crate::domain::summary::MarketsSummary;
use crate::error::Result;

/// Port for publishing evaluated markets.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait SummaryWriter: Send + Sync {
    /// Publish a summary, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be encoded or stored.
    async fn write(&self, summary: &MarketsSummary) -> Result<()>;
}
