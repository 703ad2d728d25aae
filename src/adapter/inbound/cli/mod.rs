//! CLI module graph.

pub mod analyze;
pub mod check;
pub mod command;
pub mod output;
pub mod run;

use self::command::{Cli, Commands};
use crate::error::Result;

/// Route a parsed command line to its handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));
    let log_level = cli.log_level.as_deref();

    match &cli.command {
        Commands::Run(args) => run::execute(args, log_level).await,
        Commands::Analyze(args) => analyze::execute(args, log_level).await,
        Commands::Check(args) => check::execute(args.path()),
    }
}
