//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file, then environment variable
//! overrides are applied for the paths a deployment usually changes.
//!
//! # Example
//!
//! ```no_run
//! use depthgauge::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::liquidity::LiquidityConfig;
use super::logging::LoggingConfig;
use super::service::{MarketsConfig, OutputConfig, SourceConfig};
use crate::domain::curve::LiquidityProfiler;
use crate::domain::id::MarketId;
use crate::error::{ConfigError, Result};

/// Overrides `source.snapshot_path`.
pub const ENV_SNAPSHOT_PATH: &str = "DEPTHGAUGE_SNAPSHOT_PATH";
/// Overrides `output.summary_path`.
pub const ENV_SUMMARY_PATH: &str = "DEPTHGAUGE_SUMMARY_PATH";
/// Overrides `markets.debug` with a comma separated list.
pub const ENV_DEBUG_MARKETS: &str = "DEPTHGAUGE_DEBUG_MARKETS";

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Main application configuration.
///
/// Aggregates all configuration settings for the application. Load from a TOML
/// file using [`Config::load`] or parse directly with [`Config::parse_toml`].
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retention search and tranche settings.
    #[serde(default)]
    pub liquidity: LiquidityConfig,

    /// Snapshot source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Summary output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Excluded and debugged markets.
    #[serde(default)]
    pub markets: MarketsConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a non-positive selling increment)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, env_lookup)
    }

    /// Parse configuration from TOML content, taking overrides from `lookup`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, env_lookup)
    }

    /// Load configuration from a TOML file with overrides from `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    #[allow(clippy::result_large_err)]
    pub fn load_with<P: AsRef<Path>>(
        path: P,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml_with(&content, lookup)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists; defaults are still
    /// subject to environment overrides and validation.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_or_default_with(path, env_lookup)
    }

    /// [`Config::load_or_default`] with overrides from `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load_or_default`].
    #[allow(clippy::result_large_err)]
    pub fn load_or_default_with<P: AsRef<Path>>(
        path: P,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load_with(path, lookup);
        }
        let mut config = Self::default();
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, typically the process environment.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = lookup(ENV_SNAPSHOT_PATH) {
            self.source.snapshot_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_SUMMARY_PATH) {
            self.output.summary_path = PathBuf::from(path);
        }
        if let Some(csv) = lookup(ENV_DEBUG_MARKETS) {
            self.markets.debug = csv
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(MarketId::from)
                .collect();
        }
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Build the liquidity profiler from the `[liquidity]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if a liquidity setting is out of range.
    #[allow(clippy::result_large_err)]
    pub fn profiler(&self) -> Result<LiquidityProfiler> {
        Ok(self.liquidity.profiler()?)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }

        let liquidity = &self.liquidity;
        if !liquidity.selling_increment.is_finite() || liquidity.selling_increment <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "selling_increment",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !liquidity.materiality_epsilon.is_finite() || liquidity.materiality_epsilon < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "materiality_epsilon",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if liquidity.tranches.is_empty() {
            return Err(ConfigError::MissingField { field: "tranches" }.into());
        }
        if liquidity
            .tranches
            .iter()
            .any(|amount| !amount.is_finite() || *amount <= 0.0)
        {
            return Err(ConfigError::InvalidValue {
                field: "tranches",
                reason: "every tranche must be greater than 0".to_string(),
            }
            .into());
        }

        if self.source.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "snapshot_path",
            }
            .into());
        }
        if self.source.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.output.summary_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "summary_path",
            }
            .into());
        }

        Ok(())
    }
}
