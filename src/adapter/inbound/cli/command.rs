//! Command-line interface definitions.
//!
//! Defines the CLI structure for depthgauge using `clap`. The CLI can watch a
//! snapshot file and keep a summary up to date, analyze a single snapshot, or
//! validate a configuration file.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prediction market liquidity and retention analysis CLI
#[derive(Parser, Debug)]
#[command(name = "depthgauge")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the configured log level (e.g. debug, info, warn)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the depthgauge CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the snapshot source and publish a summary for every new block
    Run(RunArgs),

    /// Summarize a single snapshot file and print the result
    Analyze(AnalyzeArgs),

    /// Validate a configuration file
    Check(ConfigArgs),
}

/// Configuration file selection shared by subcommands.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the configuration file [default: config.toml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// The selected path, or [`DEFAULT_CONFIG_PATH`].
    #[must_use]
    pub fn path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load the selected configuration.
    ///
    /// An explicit `--config` must exist. Without it, a missing
    /// [`DEFAULT_CONFIG_PATH`] falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Config::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Process the current snapshot once and exit
    #[arg(long)]
    pub once: bool,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Snapshot file to analyze
    pub snapshot: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show outcome detail for a single market
    #[arg(short, long)]
    pub market: Option<String>,
}
