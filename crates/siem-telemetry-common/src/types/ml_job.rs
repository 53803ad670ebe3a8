//! Machine learning job schemas and metrics
//!
//! Response shapes of the ML provider (modules, job summaries, anomaly
//! detector stats) and the normalized [`JobMetric`] built from them.
//! Statistics are reported as-is; every field except the job id may be
//! absent because the details and datafeed lookups are joined by id.

use serde::{Deserialize, Serialize};

use super::search::null_as_empty;
use crate::SECURITY_JOB_GROUPS;

/// Installed ML module with the jobs it ships
#[derive(Debug, Clone, Deserialize)]
pub struct MlModule {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jobs: Vec<ModuleJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleJob {
    pub id: String,
}

/// Entry of the job summary list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlJobSummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub groups: Vec<String>,
    #[serde(default)]
    pub job_state: String,
    #[serde(default)]
    pub datafeed_state: String,
}

impl MlJobSummary {
    /// Job belongs to one of the security groups
    pub fn is_security_job(&self) -> bool {
        self.groups
            .iter()
            .any(|g| SECURITY_JOB_GROUPS.contains(&g.as_str()))
    }
}

/// `GET _ml/anomaly_detectors/<group>/_stats`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobStatsResponse {
    #[serde(default)]
    pub jobs: Vec<JobStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStats {
    pub job_id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub data_counts: DataCounts,
    #[serde(default)]
    pub model_size_stats: ModelSizeStats,
    #[serde(default)]
    pub timing_stats: JobTimingStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataCounts {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bucket_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub empty_bucket_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub input_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub input_record_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_data_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub processed_record_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSizeStats {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bucket_allocation_failures_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub memory_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model_bytes_exceeded: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model_bytes_memory_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub peak_model_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTimingStats {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub average_bucket_processing_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bucket_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exponential_average_bucket_processing_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exponential_average_bucket_processing_time_per_hour_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub maximum_bucket_processing_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub minimum_bucket_processing_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_bucket_processing_time_ms: Option<f64>,
}

/// `GET _ml/anomaly_detectors/<group>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDetailsResponse {
    #[serde(default)]
    pub jobs: Vec<JobDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobDetail {
    pub job_id: String,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub finished_time: Option<i64>,
}

/// `GET _ml/datafeeds/_stats`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatafeedStatsResponse {
    #[serde(default)]
    pub datafeeds: Vec<DatafeedStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatafeedStats {
    pub datafeed_id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub timing_stats: Option<DatafeedTimingMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatafeedTimingMetric {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub average_search_time_per_bucket_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bucket_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exponential_average_search_time_per_hour_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub search_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_search_time_ms: Option<f64>,
}

/// Datafeed half of a [`JobMetric`]; empty when no datafeed matched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatafeedMetric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datafeed_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub timing_stats: DatafeedTimingMetric,
}

/// Normalized runtime statistics of one anomaly detection job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetric {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub data_counts: DataCounts,
    pub model_size_stats: ModelSizeStats,
    pub timing_stats: JobTimingStats,
    pub datafeed: DatafeedMetric,
}
