//! SIEM usage binary
//!
//! Replays recorded backend responses through the usage collector and
//! prints the resulting report.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use siem_telemetry_usage::{CollectorConfig, SnapshotBackend, UsageCollector};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting SIEM usage collector v{}", siem_telemetry_common::VERSION);

    let config = CollectorConfig::load()?;
    info!(
        rules_index = %config.rules_index,
        signals_index = %config.signals_index,
        ml_enabled = config.ml_enabled,
        "Loaded configuration"
    );

    let path = config
        .snapshot_path
        .clone()
        .context("SIEM_USAGE_SNAPSHOT must point to a recorded snapshot")?;
    let backend = Arc::new(SnapshotBackend::load(&path).await?);
    info!(path = %path.display(), ml = backend.has_ml(), "Loaded snapshot");

    let mut collector = UsageCollector::new(config, backend.clone(), backend.clone())?;
    if backend.has_ml() {
        collector = collector.with_ml(backend);
    }

    let report = collector.collect().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
