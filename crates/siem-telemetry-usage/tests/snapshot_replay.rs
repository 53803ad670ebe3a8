//! Full collection cycles against recorded backend responses

use std::sync::Arc;

use siem_telemetry_common::{UsageBucket, UsageSummary};
use siem_telemetry_usage::{CollectorConfig, SnapshotBackend, UsageCollector};

const SNAPSHOT: &str = include_str!("fixtures/snapshot.json");

fn config() -> CollectorConfig {
    CollectorConfig::new(".kibana", ".siem-signals-default")
}

fn collector_with_ml(backend: SnapshotBackend) -> UsageCollector {
    let backend = Arc::new(backend);
    UsageCollector::new(config(), backend.clone(), backend.clone())
        .unwrap()
        .with_ml(backend)
}

#[tokio::test]
async fn test_full_report() {
    let backend = SnapshotBackend::from_json(SNAPSHOT).unwrap();
    let collector = collector_with_ml(backend);

    let report = collector.collect().await;

    assert_eq!(
        report.usage.detection_rules.elastic,
        UsageBucket { enabled: 1, disabled: 1 }
    );
    assert_eq!(
        report.usage.detection_rules.custom,
        UsageBucket { enabled: 1, disabled: 0 }
    );
    assert_eq!(report.usage.ml_jobs.elastic, UsageBucket { enabled: 1, disabled: 0 });
    assert_eq!(report.usage.ml_jobs.custom, UsageBucket { enabled: 0, disabled: 1 });

    let rules = &report.metrics.detection_rules;
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].rule_name.as_deref(), Some("Unusual Parent Process for cmd.exe"));
    assert_eq!(rules[0].alert_count_daily, 42);
    assert_eq!(rules[0].cases_count_daily, 1);
    assert_eq!(rules[0].rule_version, Some(5));
    assert_eq!(rules[1].alert_count_daily, 0);
    assert_eq!(rules[1].cases_count_daily, 0);

    let jobs = &report.metrics.ml_jobs;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].create_time, Some(1_620_633_600_000));
    assert_eq!(jobs[0].datafeed.timing_stats.search_count, Some(97));

    assert_eq!(collector.metrics().collections_total.get(), 1);
}

#[tokio::test]
async fn test_report_serializes_with_snake_case_fields() {
    let collector = collector_with_ml(SnapshotBackend::from_json(SNAPSHOT).unwrap());
    let report = collector.collect().await;

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["usage"]["detection_rules"]["elastic"]["enabled"], 1);
    assert_eq!(value["metrics"]["detection_rules"][0]["alert_count_daily"], 42);
    assert_eq!(
        value["metrics"]["ml_jobs"][0]["datafeed"]["datafeed_id"],
        "datafeed-rare_process_by_host_linux_ecs"
    );
    // absent joins are omitted rather than null
    assert!(value["metrics"]["ml_jobs"][0].get("finished_time").is_none());
}

#[tokio::test]
async fn test_missing_sections_zero_out_independently() {
    let mut backend = SnapshotBackend::from_json(SNAPSHOT).unwrap();
    backend.case_comments = None;
    backend.ml = None;
    let backend = Arc::new(backend);

    // ML provider without recorded responses: every ML fetch fails
    let collector = UsageCollector::new(config(), backend.clone(), backend.clone())
        .unwrap()
        .with_ml(backend);

    let report = collector.collect().await;

    assert_eq!(report.usage.detection_rules.total(), 3);
    assert_eq!(report.usage.ml_jobs, UsageSummary::zeroed());
    assert!(report.metrics.detection_rules.is_empty());
    assert!(report.metrics.ml_jobs.is_empty());

    let metrics = collector.metrics();
    assert_eq!(metrics.failures("rules_usage"), 0);
    assert_eq!(metrics.failures("detection_rule_metrics"), 1);
    assert_eq!(metrics.failures("ml_jobs_usage"), 1);
    assert_eq!(metrics.failures("ml_job_metrics"), 1);
}

#[tokio::test]
async fn test_without_ml_provider() {
    let backend = Arc::new(SnapshotBackend::from_json(SNAPSHOT).unwrap());
    let collector = UsageCollector::new(config(), backend.clone(), backend).unwrap();

    let usage = collector.fetch_detections_usage().await;
    assert_eq!(usage.detection_rules.total(), 3);
    assert!(usage.ml_jobs.is_zeroed());
    assert_eq!(collector.metrics().failures("ml_jobs_usage"), 0);
}

#[tokio::test]
async fn test_load_from_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json");
    let backend = SnapshotBackend::load(path).await.unwrap();
    assert!(backend.has_ml());
    assert!(backend.rules.is_some());
}
