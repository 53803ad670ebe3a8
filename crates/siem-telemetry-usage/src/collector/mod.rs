//! Best-effort usage collector
//!
//! Each entry point comes in two flavors:
//! - `try_*` returns the upstream error
//! - the plain variant substitutes the zeroed/empty default, logs a warning
//!   and counts the failure, so usage reporting never breaks its host
//!
//! Upstream fetches of one entry point are issued as a small concurrent batch.

mod ml;
mod rules;

use siem_telemetry_common::{
    DetectionsMetrics, DetectionsReport, DetectionsUsage, Result, ServiceCredential,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::backend::{MlProvider, SavedObjectsStore, SearchBackend};
use crate::config::CollectorConfig;
use crate::metrics::CollectorMetrics;

/// Collects detection rule and ML job usage from the external collaborators
pub struct UsageCollector {
    config: CollectorConfig,
    search: Arc<dyn SearchBackend>,
    saved_objects: Arc<dyn SavedObjectsStore>,
    /// Absent when ML is not installed or disabled
    ml: Option<Arc<dyn MlProvider>>,
    /// Identity used for ML provider calls
    credential: ServiceCredential,
    metrics: Arc<CollectorMetrics>,
}

impl UsageCollector {
    /// Create a collector acting under the internal service identity.
    ///
    /// The configuration is validated first.
    pub fn new(
        mut config: CollectorConfig,
        search: Arc<dyn SearchBackend>,
        saved_objects: Arc<dyn SavedObjectsStore>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            search,
            saved_objects,
            ml: None,
            credential: ServiceCredential::internal(),
            metrics: Arc::new(CollectorMetrics::new()?),
        })
    }

    /// Attach the ML provider; ignored when ML is disabled in the config
    pub fn with_ml(mut self, ml: Arc<dyn MlProvider>) -> Self {
        if self.config.ml_enabled {
            self.ml = Some(ml);
        }
        self
    }

    /// Use a different identity for ML provider calls
    pub fn with_credential(mut self, credential: ServiceCredential) -> Self {
        self.credential = credential;
        self
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &CollectorMetrics {
        &self.metrics
    }

    /// Map a failed fetch to `default`, logging and counting it
    fn best_effort<T>(&self, operation: &'static str, result: Result<T>, default: T) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    operation,
                    source = e.source_label(),
                    error = %e,
                    "Usage fetch failed, reporting zeroed usage"
                );
                self.metrics.record_failure(operation);
                default
            }
        }
    }

    /// Rule and ML job usage counters
    #[instrument(skip(self))]
    pub async fn fetch_detections_usage(&self) -> DetectionsUsage {
        let (detection_rules, ml_jobs) = futures::join!(self.rules_usage(), self.ml_jobs_usage());
        DetectionsUsage {
            detection_rules,
            ml_jobs,
        }
    }

    /// Rule and ML job metric rows
    #[instrument(skip(self))]
    pub async fn fetch_detections_metrics(&self) -> DetectionsMetrics {
        let (detection_rules, ml_jobs) =
            futures::join!(self.detection_rule_metrics(), self.ml_job_metrics());
        DetectionsMetrics {
            detection_rules,
            ml_jobs,
        }
    }

    /// Run one full collection cycle
    #[instrument(skip(self))]
    pub async fn collect(&self) -> DetectionsReport {
        let started = Instant::now();
        let (usage, metrics) =
            futures::join!(self.fetch_detections_usage(), self.fetch_detections_metrics());

        self.metrics.collections_total.inc();
        self.metrics
            .collection_duration_seconds
            .observe(started.elapsed().as_secs_f64());

        let report = DetectionsReport::new(usage, metrics);
        info!(
            report_id = %report.report_id,
            rules = report.usage.detection_rules.total(),
            ml_jobs = report.usage.ml_jobs.total(),
            rule_metrics = report.metrics.detection_rules.len(),
            job_metrics = report.metrics.ml_jobs.len(),
            "Collected detections usage"
        );
        report
    }

    /// Collect a report every configured interval and send it to `reports`.
    ///
    /// The first report is collected immediately. The loop ends once the
    /// receiver is dropped.
    pub fn start_collection_loop(
        self: Arc<Self>,
        reports: mpsc::Sender<DetectionsReport>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.config.collection_interval());

            loop {
                interval.tick().await;
                let report = self.collect().await;
                if reports.send(report).await.is_err() {
                    debug!("Report receiver dropped, collection loop exiting");
                    break;
                }
            }
        })
    }
}
