//! Snapshot file in, summary file out.

mod support;

use std::path::Path;

use depthgauge::adapter::outbound::file::FileSnapshotSource;
use depthgauge::domain::{MarketId, MarketKind, OutcomeId};
use depthgauge::error::Error;
use depthgauge::infrastructure::bootstrap;
use depthgauge::infrastructure::config::settings::Config;
use depthgauge::port::SnapshotSource;
use depthgauge::service::PollOutcome;
use serde_json::Value;
use support::book::assert_near;
use support::snapshot::{categorical_market, snapshot, write_snapshot, yes_no_market};

fn toml_list(ids: &[&str]) -> String {
    ids.iter()
        .map(|id| format!("{id:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn config_for(dir: &Path, excluded: &[&str]) -> Config {
    config_with_featured(dir, excluded, &[])
}

fn config_with_featured(dir: &Path, excluded: &[&str], featured: &[&str]) -> Config {
    Config::parse_toml_with(
        &format!(
        r#"
[source]
snapshot_path = {snapshot:?}

[output]
summary_path = {summary:?}

[markets]
excluded = [{excluded}]
featured = [{featured}]
"#,
            snapshot = dir.join("snapshot.json").display().to_string(),
            summary = dir.join("out").join("markets.json").display().to_string(),
            excluded = toml_list(excluded),
            featured = toml_list(featured),
        ),
        |_| None,
    )
    .unwrap()
}

fn read_summary(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn watcher_publishes_each_new_block_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[]);
    write_snapshot(
        &config.source.snapshot_path,
        &snapshot(
            100,
            vec![
                yes_no_market("0xsmall", "10", "0.45", "0.55"),
                categorical_market("0xbig", "250.5", &["0.4", "0.2", "0.15", "0.25"]),
            ],
        ),
    );

    let watcher = bootstrap::build_watcher(&config).unwrap();
    assert_eq!(
        watcher.poll_once().await.unwrap(),
        PollOutcome::Processed {
            block: 100,
            markets: 2
        }
    );

    let published = read_summary(&config.output.summary_path);
    assert_eq!(published["block"], 100);
    assert_eq!(published["total_markets"], 2);
    assert_eq!(published["total_capitalization"], "260.5");
    assert_eq!(published["markets"][0]["id"], "0xbig");
    assert_eq!(published["markets"][1]["id"], "0xsmall");

    let latest = watcher.latest().unwrap();
    let small = latest.market(&MarketId::from("0xsmall")).unwrap();
    assert_eq!(small.kind, MarketKind::YesNo);
    assert_eq!(small.best_bids[&OutcomeId::UPPER].price(), 0.45);
    assert_eq!(small.best_asks[&OutcomeId::UPPER].price(), 0.55);
    for point in small.liquidity.points() {
        assert_near(0.9, point.retention_ratio);
    }
    let big = latest.market(&MarketId::from("0xbig")).unwrap();
    for point in big.liquidity.points() {
        assert_near(1.0, point.retention_ratio);
    }
    assert_eq!(big.predictions[0].name, "Outcome 0");

    assert_eq!(
        watcher.poll_once().await.unwrap(),
        PollOutcome::Skipped { block: 100 }
    );

    write_snapshot(
        &config.source.snapshot_path,
        &snapshot(101, vec![yes_no_market("0xsmall", "10", "0.45", "0.55")]),
    );
    assert_eq!(
        watcher.poll_once().await.unwrap(),
        PollOutcome::Processed {
            block: 101,
            markets: 1
        }
    );
    assert_eq!(read_summary(&config.output.summary_path)["block"], 101);
    assert_eq!(watcher.last_block(), Some(101));
}

#[tokio::test]
async fn excluded_and_malformed_markets_are_left_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &["0xhidden"]);

    let mut broken = yes_no_market("0xbroken", "1", "0.45", "0.55");
    broken["outstanding_shares"] = Value::from("lots");
    write_snapshot(
        &config.source.snapshot_path,
        &snapshot(
            7,
            vec![
                yes_no_market("0xkept", "1", "0.5", "0.5"),
                yes_no_market("0xhidden", "1", "0.5", "0.5"),
                broken,
            ],
        ),
    );

    let watcher = bootstrap::build_watcher(&config).unwrap();
    watcher.poll_once().await.unwrap();

    let published = read_summary(&config.output.summary_path);
    assert_eq!(published["total_markets"], 1);
    assert_eq!(published["markets"][0]["id"], "0xkept");
}

#[tokio::test]
async fn featured_flag_and_metadata_are_published() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_featured(dir.path(), &[], &["0xstar"]);

    let mut star = yes_no_market("0xstar", "5", "0.45", "0.55");
    star["author"] = Value::from("0xauthor");
    star["creation_time"] = Value::from(1_650_000_000u64);
    star["creation_block"] = Value::from(14_000_000u64);
    star["resolution_source"] = Value::from("https://example.org/results");
    star["details"] = Value::from("Resolves on the published result.");
    star["tags"] = serde_json::json!(["politics", "election"]);
    write_snapshot(
        &config.source.snapshot_path,
        &snapshot(
            9,
            vec![star, yes_no_market("0xplain", "1", "0.45", "0.55")],
        ),
    );

    let watcher = bootstrap::build_watcher(&config).unwrap();
    watcher.poll_once().await.unwrap();

    let published = read_summary(&config.output.summary_path);
    let star = &published["markets"][0];
    assert_eq!(star["id"], "0xstar");
    assert_eq!(star["is_featured"], true);
    assert_eq!(star["author"], "0xauthor");
    assert_eq!(star["creation_time"], 1_650_000_000u64);
    assert_eq!(star["creation_block"], 14_000_000u64);
    assert_eq!(star["resolution_source"], "https://example.org/results");
    assert_eq!(star["details"], "Resolves on the published result.");
    assert_eq!(star["tags"], serde_json::json!(["politics", "election"]));

    let plain = &published["markets"][1];
    assert_eq!(plain["is_featured"], false);
    assert!(plain.get("author").is_none());
    assert!(plain.get("tags").is_none());

    let latest = watcher.latest().unwrap();
    let star = latest.market(&MarketId::from("0xstar")).unwrap();
    assert!(star.is_featured);
    assert_eq!(star.metadata.author.as_deref(), Some("0xauthor"));
    assert_eq!(star.metadata.tags, vec!["politics", "election"]);
    assert!(!latest.market(&MarketId::from("0xplain")).unwrap().is_featured);
}

#[tokio::test]
async fn missing_snapshot_publishes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[]);
    let watcher = bootstrap::build_watcher(&config).unwrap();

    assert!(matches!(watcher.poll_once().await, Err(Error::Io(_))));
    assert!(!config.output.summary_path.exists());
    assert_eq!(watcher.last_block(), None);
}

#[tokio::test]
async fn analyzer_matches_watcher_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[]);
    write_snapshot(
        &config.source.snapshot_path,
        &snapshot(3, vec![yes_no_market("0xa", "4", "0.3", "0.9")]),
    );

    let snapshot = FileSnapshotSource::new(&config.source.snapshot_path)
        .fetch()
        .await
        .unwrap();
    let summary = bootstrap::build_analyzer(&config).unwrap().summarize(&snapshot);

    let market = &summary.markets[0];
    for point in market.liquidity.points() {
        assert_near(0.3 + 0.1, point.retention_ratio);
    }
    assert_eq!(market.predictions.len(), 1);
}
