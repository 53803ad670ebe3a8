//! In-memory backend replaying recorded responses
//!
//! One JSON document holds the raw responses of every collaborator. A
//! missing section behaves like an unreachable upstream.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use siem_telemetry_common::{Result, ServiceCredential, UsageError};
use std::path::Path;
use tracing::debug;

use super::{
    FindRequest, MlProvider, SavedObjectsStore, SearchBackend, SearchKind, SearchRequest,
};

/// Recorded ML provider responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MlSnapshot {
    #[serde(default)]
    pub modules: Option<Value>,
    #[serde(default)]
    pub jobs_summary: Option<Value>,
    #[serde(default)]
    pub job_stats: Option<Value>,
    #[serde(default)]
    pub jobs: Option<Value>,
    #[serde(default)]
    pub datafeed_stats: Option<Value>,
}

/// Recorded search, saved-object and ML responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotBackend {
    /// Rule search response, full `_source`
    #[serde(default)]
    pub rules: Option<Value>,
    /// Daily alert aggregation response
    #[serde(default)]
    pub alerts: Option<Value>,
    /// Case comment find response
    #[serde(default)]
    pub case_comments: Option<Value>,
    #[serde(default)]
    pub ml: Option<MlSnapshot>,
}

impl SnapshotBackend {
    /// Parse a snapshot document
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse a snapshot file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        debug!(path = %path.as_ref().display(), bytes = raw.len(), "Loaded snapshot");
        Self::from_json(&raw)
    }

    /// True when ML responses were recorded
    pub fn has_ml(&self) -> bool {
        self.ml.is_some()
    }

    fn ml_section(
        &self,
        operation: &'static str,
        pick: fn(&MlSnapshot) -> &Option<Value>,
    ) -> Result<Value> {
        self.ml
            .as_ref()
            .and_then(|ml| pick(ml).clone())
            .ok_or_else(|| UsageError::Ml {
                operation,
                reason: "no recorded response".into(),
            })
    }
}

#[async_trait]
impl SearchBackend for SnapshotBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Value> {
        let recorded = match request.kind {
            SearchKind::AlertCounts => &self.alerts,
            SearchKind::RuleDefinitions => &self.rules,
        };
        recorded.clone().ok_or_else(|| UsageError::Search {
            index: request.index.clone(),
            reason: "no recorded response".into(),
        })
    }
}

#[async_trait]
impl SavedObjectsStore for SnapshotBackend {
    async fn find(&self, request: &FindRequest) -> Result<Value> {
        self.case_comments.clone().ok_or_else(|| UsageError::SavedObjects {
            object_type: request.object_type.clone(),
            reason: "no recorded response".into(),
        })
    }
}

#[async_trait]
impl MlProvider for SnapshotBackend {
    async fn list_modules(&self, _credential: &ServiceCredential) -> Result<Value> {
        self.ml_section("list_modules", |ml| &ml.modules)
    }

    async fn jobs_summary(&self, _credential: &ServiceCredential) -> Result<Value> {
        self.ml_section("jobs_summary", |ml| &ml.jobs_summary)
    }

    async fn job_stats(&self, _credential: &ServiceCredential, _job_group: &str) -> Result<Value> {
        self.ml_section("job_stats", |ml| &ml.job_stats)
    }

    async fn jobs(&self, _credential: &ServiceCredential, _job_group: &str) -> Result<Value> {
        self.ml_section("jobs", |ml| &ml.jobs)
    }

    async fn datafeed_stats(&self, _credential: &ServiceCredential) -> Result<Value> {
        self.ml_section("datafeed_stats", |ml| &ml.datafeed_stats)
    }
}
