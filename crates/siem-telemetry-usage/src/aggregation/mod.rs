//! Usage aggregation
//!
//! Pure, request-scoped transformations from decoded backend responses to
//! usage values:
//! - [`classify_and_count`]: folds classified records into a [`UsageSummary`]
//! - [`build_job_metrics`]: joins job stats with details and datafeed stats
//! - [`build_rule_metrics`]: joins prebuilt rules with daily alert and case counts
//!
//! [`UsageSummary`]: siem_telemetry_common::UsageSummary

pub mod classify;
pub mod job_metrics;
pub mod rule_metrics;

pub use classify::{classify_and_count, classify_job, classify_rule, is_job_loading, is_job_started};
pub use job_metrics::build_job_metrics;
pub use rule_metrics::{
    alert_counts_by_rule, build_rule_metrics, count_case_attachments, RuleCounts,
};
