//! External collaborators
//!
//! The search backend, the saved-object store and the ML provider are
//! opaque services. Each returns raw JSON; callers decode it into the
//! schemas of [`siem_telemetry_common::types`] before aggregating.

pub mod request;
pub mod snapshot;

pub use request::{FindRequest, SearchKind, SearchRequest};
pub use snapshot::{MlSnapshot, SnapshotBackend};

use async_trait::async_trait;
use serde_json::Value;
use siem_telemetry_common::{Result, ServiceCredential};

/// Document search and aggregation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Value>;
}

/// Saved-object lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedObjectsStore: Send + Sync {
    async fn find(&self, request: &FindRequest) -> Result<Value>;
}

/// Machine learning provider, always called under an explicit credential
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MlProvider: Send + Sync {
    /// Installed modules with the job ids they ship
    async fn list_modules(&self, credential: &ServiceCredential) -> Result<Value>;

    /// Summary of every job with its job and datafeed state
    async fn jobs_summary(&self, credential: &ServiceCredential) -> Result<Value>;

    /// Anomaly detector stats of the jobs in `job_group`
    async fn job_stats(&self, credential: &ServiceCredential, job_group: &str) -> Result<Value>;

    /// Anomaly detector definitions of the jobs in `job_group`
    async fn jobs(&self, credential: &ServiceCredential, job_group: &str) -> Result<Value>;

    /// Stats of every datafeed
    async fn datafeed_stats(&self, credential: &ServiceCredential) -> Result<Value>;
}
