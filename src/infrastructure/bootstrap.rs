//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::file::{FileSnapshotSource, JsonFileWriter};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::service::{Analyzer, Watcher};

/// Build the snapshot analyzer from configuration.
///
/// # Errors
///
/// Returns an error if the liquidity settings are out of range.
#[allow(clippy::result_large_err)]
pub fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let profiler = config.profiler()?;
    info!(
        tranches = profiler.tranches().len(),
        selling_increment = profiler.selling_increment(),
        excluded = config.markets.excluded.len(),
        featured = config.markets.featured.len(),
        "Analyzer initialized"
    );
    Ok(
        Analyzer::new(profiler, config.markets.excluded.iter().cloned())
            .with_featured(config.markets.featured.iter().cloned()),
    )
}

/// Build a watcher wired to the configured snapshot file and summary file.
///
/// # Errors
///
/// Returns an error if the analyzer cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_watcher(config: &Config) -> Result<Watcher> {
    let analyzer = build_analyzer(config)?;
    let source = Arc::new(FileSnapshotSource::new(&config.source.snapshot_path));
    let writer = Arc::new(JsonFileWriter::new(&config.output.summary_path));
    info!(
        snapshot = %config.source.snapshot_path.display(),
        summary = %config.output.summary_path.display(),
        "File adapters initialized"
    );

    Ok(
        Watcher::new(source, writer, analyzer, config.source.poll_interval())
            .with_debug_markets(config.markets.debug.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let config = Config::default();
        let analyzer = build_analyzer(&config).unwrap();
        assert_eq!(
            analyzer.profiler().tranches().len(),
            config.liquidity.tranches.len()
        );
        let watcher = build_watcher(&config).unwrap();
        assert!(watcher.latest().is_none());
    }

    #[test]
    fn invalid_liquidity_settings_fail() {
        let mut config = Config::default();
        config.liquidity.selling_increment = 0.0;
        assert!(build_analyzer(&config).is_err());
    }
}
