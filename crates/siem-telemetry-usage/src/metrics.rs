//! Prometheus metrics for the usage collector
//!
//! Upstream failures never reach the caller of a best-effort entry point,
//! so they are counted here by source.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use siem_telemetry_common::{Result, UsageError};

pub struct CollectorMetrics {
    pub collections_total: IntCounter,
    pub fetch_failures: IntCounterVec,
    pub collection_duration_seconds: Histogram,
}

impl CollectorMetrics {
    pub fn new() -> Result<Self> {
        Ok(Self {
            collections_total: IntCounter::new(
                "siem_usage_collections_total",
                "Total usage collection cycles",
            )
            .map_err(metrics_error)?,
            fetch_failures: IntCounterVec::new(
                Opts::new(
                    "siem_usage_fetch_failures_total",
                    "Upstream fetches replaced by a zeroed result",
                ),
                &["source"],
            )
            .map_err(metrics_error)?,
            collection_duration_seconds: Histogram::with_opts(
                HistogramOpts::new(
                    "siem_usage_collection_duration_seconds",
                    "Duration of a full collection cycle",
                )
                .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            )
            .map_err(metrics_error)?,
        })
    }

    pub fn register(&self, registry: &Registry) -> Result<()> {
        registry
            .register(Box::new(self.collections_total.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(self.fetch_failures.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(self.collection_duration_seconds.clone()))
            .map_err(metrics_error)?;
        Ok(())
    }

    /// Count a swallowed failure of `operation`
    pub fn record_failure(&self, operation: &str) {
        self.fetch_failures.with_label_values(&[operation]).inc();
    }

    /// Failures counted so far for `operation`
    pub fn failures(&self, operation: &str) -> u64 {
        self.fetch_failures.with_label_values(&[operation]).get()
    }
}

fn metrics_error(err: prometheus::Error) -> UsageError {
    UsageError::Metrics(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_count() {
        let metrics = CollectorMetrics::new().unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();

        metrics.record_failure("rules_usage");
        metrics.record_failure("rules_usage");
        assert_eq!(metrics.failures("rules_usage"), 2);
        assert_eq!(metrics.failures("ml_jobs_usage"), 0);

        // Registering twice is rejected by the registry
        assert!(metrics.register(&registry).is_err());
    }
}
