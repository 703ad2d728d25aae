//! Handler for the `analyze` command.

use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::AnalyzeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::file::FileSnapshotSource;
use crate::domain::id::MarketId;
use crate::domain::prediction::Prediction;
use crate::domain::summary::{MarketSummary, MarketsSummary};
use crate::domain::tranche::Tranche;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::port::SnapshotSource;
use crate::service::debug::log_debug_markets;

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Percent")]
    percent: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&Prediction> for PredictionRow {
    fn from(prediction: &Prediction) -> Self {
        Self {
            outcome: prediction.outcome_id.to_string(),
            name: prediction.name.clone(),
            percent: prediction
                .percent
                .map_or_else(|| "-".to_string(), |p| format!("{p:.1}%")),
            value: prediction
                .value
                .map_or_else(|| "-".to_string(), |v| format!("{v:.4}")),
        }
    }
}

/// Execute the analyze command.
pub async fn execute(args: &AnalyzeArgs, log_level: Option<&str>) -> Result<()> {
    let mut config = args.config.load()?;
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }
    config.init_logging();

    let analyzer = bootstrap::build_analyzer(&config)?;
    let snapshot = FileSnapshotSource::new(&args.snapshot).fetch().await?;
    let (snapshot, summary) = tokio::task::spawn_blocking(move || {
        let summary = analyzer.summarize(&snapshot);
        (snapshot, summary)
    })
    .await?;

    if !config.markets.debug.is_empty() {
        log_debug_markets(&config.markets.debug, &snapshot, &summary);
    }

    if let Some(id) = &args.market {
        let market = summary
            .market(&MarketId::from(id.as_str()))
            .ok_or_else(|| Error::MarketNotFound(id.clone()))?;
        if output::is_json() {
            println!("{}", serde_json::to_string_pretty(market)?);
        } else {
            print_market(market);
        }
        return Ok(());
    }

    if output::is_json() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &MarketsSummary) {
    output::section("Snapshot");
    output::field("Block", summary.block);
    output::field("Markets", summary.total_markets);
    output::field("Capitalization", summary.total_capitalization);

    if summary.markets.is_empty() {
        output::warning("No markets could be evaluated");
        return;
    }

    output::section("Retention");
    output::block(&retention_table(summary));
}

fn print_market(market: &MarketSummary) {
    output::section(&market.name);
    output::field("Market", output::highlight(&market.id));
    output::field("Kind", market.kind);
    output::field("Capitalization", market.capitalization);
    if let Some(category) = &market.category {
        output::field("Category", category);
    }
    if let Some(denomination) = &market.scalar_denomination {
        output::field("Denomination", denomination);
    }
    if market.is_featured {
        output::field("Featured", "yes");
    }
    if !market.metadata.tags.is_empty() {
        output::field("Tags", market.metadata.tags.join(", "));
    }

    output::section("Liquidity");
    for point in market.liquidity.points() {
        output::field(
            &tranche_label(point.tranche),
            format!("{:.3}", point.retention_ratio),
        );
    }

    output::section("Predictions");
    if market.predictions.is_empty() {
        output::note("no prediction could be derived for this market");
    } else {
        let rows: Vec<PredictionRow> = market.predictions.iter().map(PredictionRow::from).collect();
        output::block(&Table::new(rows).to_string());
    }
}

/// Tranches are capital in settlement currency.
fn tranche_label(tranche: Tranche) -> String {
    format!("{tranche} capital")
}

/// One row per market with a column per tranche.
fn retention_table(summary: &MarketsSummary) -> String {
    let mut builder = Builder::default();

    let tranches: Vec<String> = summary
        .markets
        .first()
        .map(|m| {
            m.liquidity
                .points()
                .iter()
                .map(|p| p.tranche.amount().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut header = vec![
        "Market".to_string(),
        "Kind".to_string(),
        "Capitalization".to_string(),
    ];
    header.extend(tranches);
    builder.push_record(header);

    for market in &summary.markets {
        let mut row = vec![
            market.id.to_string(),
            market.kind.to_string(),
            market.capitalization.to_string(),
        ];
        row.extend(
            market
                .liquidity
                .points()
                .iter()
                .map(|p| format!("{:.3}", p.retention_ratio)),
        );
        builder.push_record(row);
    }

    builder.build().to_string()
}
