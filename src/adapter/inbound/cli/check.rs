//! Handler for the `check` command.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate a configuration file without starting the watcher.
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    let profiler = config.profiler()?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Liquidity");
    output::field("Increment", profiler.selling_increment());
    output::field("Epsilon", config.liquidity.materiality_epsilon);
    output::field(
        "Tranches",
        profiler
            .tranches()
            .iter()
            .map(|t| t.amount().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    );

    output::section("Files");
    output::field("Snapshot", config.source.snapshot_path.display());
    output::field("Summary", config.output.summary_path.display());
    output::field("Poll interval", format!("{}s", config.source.poll_interval_secs));
    if !config.source.snapshot_path.exists() {
        output::warning("Snapshot file does not exist yet");
    }

    output::section("Markets");
    output::field("Excluded", config.markets.excluded.len());
    output::field("Featured", config.markets.featured.len());
    output::field("Debugged", config.markets.debug.len());

    output::success("Configuration check complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    }

    #[test]
    fn valid_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[liquidity]\ntranches = [1, 5]\n").unwrap();
        assert!(execute(&path).is_ok());
    }
}
