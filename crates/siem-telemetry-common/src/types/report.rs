//! Collection report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ml_job::JobMetric;
use super::rule::RuleMetric;
use super::usage::UsageSummary;

/// Usage counters of one collection cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionsUsage {
    pub detection_rules: UsageSummary,
    pub ml_jobs: UsageSummary,
}

/// Per-rule and per-job metric rows of one collection cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionsMetrics {
    pub detection_rules: Vec<RuleMetric>,
    pub ml_jobs: Vec<JobMetric>,
}

/// Everything gathered in one collection cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionsReport {
    pub report_id: Uuid,
    pub collected_at: DateTime<Utc>,
    pub usage: DetectionsUsage,
    pub metrics: DetectionsMetrics,
}

impl DetectionsReport {
    pub fn new(usage: DetectionsUsage, metrics: DetectionsMetrics) -> Self {
        Self {
            report_id: Uuid::now_v7(),
            collected_at: Utc::now(),
            usage,
            metrics,
        }
    }
}
