//! Handler for the `run` command.

use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::service::PollOutcome;

/// Execute the run command.
pub async fn execute(args: &RunArgs, log_level: Option<&str>) -> Result<()> {
    let mut config = args.config.load()?;
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Snapshot", config.source.snapshot_path.display());
    output::field("Summary", config.output.summary_path.display());
    output::field("Poll interval", format!("{}s", config.source.poll_interval_secs));
    output::field("Tranches", format!("{:?}", config.liquidity.tranches));

    config.init_logging();
    let watcher = bootstrap::build_watcher(&config)?;

    if args.once {
        match watcher.poll_once().await? {
            PollOutcome::Processed { block, markets } => {
                output::success(&format!("Published block {block} with {markets} markets"));
            }
            PollOutcome::Skipped { block } => {
                output::note(&format!("Block {block} was already published"));
            }
        }
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    watcher.run(shutdown_rx).await?;
    info!(last_block = ?watcher.last_block(), "depthgauge stopped");
    Ok(())
}
