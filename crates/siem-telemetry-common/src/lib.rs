//! # SIEM Telemetry Common
//!
//! Shared types, response schemas, and errors for detection usage telemetry.
//!
//! ## Core Types
//!
//! - [`UsageSummary`]: elastic/custom × enabled/disabled counter table
//! - [`RuleMetric`]: per-rule daily alert and case-attachment counts
//! - [`JobMetric`]: normalized runtime statistics of one anomaly detection job
//! - [`DetectionsReport`]: one full collection cycle
//!
//! ## Schemas
//!
//! - [`types::search`]: search and saved-object response shapes
//! - [`types::ml_job`]: machine learning provider response shapes
//!
//! Raw backend responses are decoded into these schemas at the boundary with
//! [`decode`] before any aggregation runs.

pub mod credential;
pub mod error;
pub mod types;

pub use credential::ServiceCredential;
pub use error::{Result, UsageError};
pub use types::{
    ml_job::{DatafeedMetric, DatafeedTimingMetric, JobMetric},
    report::{DetectionsMetrics, DetectionsReport, DetectionsUsage},
    rule::RuleMetric,
    usage::{ClassifiedRecord, DetectionRulesUsage, MlJobsUsage, UsageBucket, UsageSummary},
};

use serde::de::DeserializeOwned;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Alert type id of detection rules
pub const SIGNALS_ID: &str = "siem.signals";

/// Tag key marking rules shipped in the prebuilt rule pack
pub const INTERNAL_IMMUTABLE_KEY: &str = "__internal_immutable";

/// Search backend `index.max_result_window` default
pub const MAX_RESULT_WINDOW: usize = 10_000;

/// Saved-object type of case comments
pub const CASE_COMMENT_TYPE: &str = "cases-comments";

/// Job group passed to anomaly detector lookups
pub const SECURITY_JOB_GROUP: &str = "security";

/// Groups that mark a job as a security job
pub const SECURITY_JOB_GROUPS: [&str; 2] = ["siem", "security"];

/// Prefix of the datafeed paired with a job
pub const DATAFEED_ID_PREFIX: &str = "datafeed-";

/// Full immutable tag, e.g. `__internal_immutable:true`
pub fn immutable_tag() -> String {
    format!("{}:true", INTERNAL_IMMUTABLE_KEY)
}

/// Datafeed id paired with `job_id`
pub fn datafeed_id_for(job_id: &str) -> String {
    format!("{}{}", DATAFEED_ID_PREFIX, job_id)
}

/// Decode a raw backend response into an explicit schema
pub fn decode<T: DeserializeOwned>(source: &'static str, raw: serde_json::Value) -> Result<T> {
    serde_json::from_value(raw).map_err(|e| UsageError::Decode {
        source_name: source,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        count: u64,
    }

    #[test]
    fn test_datafeed_id_for() {
        assert_eq!(datafeed_id_for("rare_process"), "datafeed-rare_process");
    }

    #[test]
    fn test_immutable_tag() {
        assert_eq!(immutable_tag(), "__internal_immutable:true");
    }

    #[test]
    fn test_decode_reports_source() {
        let ok: Probe = decode("probe", json!({ "count": 3 })).unwrap();
        assert_eq!(ok.count, 3);

        let err = decode::<Probe>("probe", json!({ "count": "three" })).unwrap_err();
        assert!(matches!(err, UsageError::Decode { source_name: "probe", .. }));
    }
}
