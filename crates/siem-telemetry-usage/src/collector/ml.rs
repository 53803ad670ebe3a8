//! ML job usage and metrics

use siem_telemetry_common::decode;
use siem_telemetry_common::types::ml_job::{
    DatafeedStatsResponse, JobDetailsResponse, JobStatsResponse, MlJobSummary, MlModule,
};
use siem_telemetry_common::{JobMetric, MlJobsUsage, Result, UsageSummary, SECURITY_JOB_GROUP};
use std::collections::HashSet;
use tracing::{debug, instrument};

use super::UsageCollector;
use crate::aggregation::{build_job_metrics, classify_and_count, classify_job};

impl UsageCollector {
    /// Count security jobs by provenance and running state.
    ///
    /// Without an ML provider the zeroed summary is returned and nothing is called.
    pub async fn try_ml_jobs_usage(&self) -> Result<MlJobsUsage> {
        let Some(ml) = self.ml.as_ref() else {
            return Ok(UsageSummary::zeroed());
        };

        let (modules_raw, jobs_raw) = futures::try_join!(
            ml.list_modules(&self.credential),
            ml.jobs_summary(&self.credential),
        )?;
        let modules: Vec<MlModule> = decode("ml modules", modules_raw)?;
        let jobs: Vec<MlJobSummary> = decode("ml jobs summary", jobs_raw)?;

        let module_job_ids: HashSet<&str> = modules
            .iter()
            .flat_map(|m| m.jobs.iter().map(|j| j.id.as_str()))
            .collect();

        let security_jobs: Vec<&MlJobSummary> =
            jobs.iter().filter(|j| j.is_security_job()).collect();
        debug!(
            modules = modules.len(),
            jobs = jobs.len(),
            security_jobs = security_jobs.len(),
            principal = %self.credential.principal,
            "Fetched ML jobs for usage"
        );

        Ok(classify_and_count(security_jobs, |job| classify_job(job, &module_job_ids)))
    }

    /// Best-effort [`UsageCollector::try_ml_jobs_usage`]; zeroed on failure
    #[instrument(skip(self))]
    pub async fn ml_jobs_usage(&self) -> MlJobsUsage {
        let result = self.try_ml_jobs_usage().await;
        self.best_effort("ml_jobs_usage", result, UsageSummary::zeroed())
    }

    /// Runtime statistics of every security job, joined with job details
    /// and datafeed stats. Empty without an ML provider.
    pub async fn try_ml_job_metrics(&self) -> Result<Vec<JobMetric>> {
        let Some(ml) = self.ml.as_ref() else {
            return Ok(Vec::new());
        };

        let (stats_raw, details_raw, datafeeds_raw) = futures::try_join!(
            ml.job_stats(&self.credential, SECURITY_JOB_GROUP),
            ml.jobs(&self.credential, SECURITY_JOB_GROUP),
            ml.datafeed_stats(&self.credential),
        )?;
        let stats: JobStatsResponse = decode("ml job stats", stats_raw)?;
        let details: JobDetailsResponse = decode("ml job details", details_raw)?;
        let datafeeds: DatafeedStatsResponse = decode("ml datafeed stats", datafeeds_raw)?;

        Ok(build_job_metrics(stats.jobs, details.jobs, datafeeds.datafeeds))
    }

    /// Best-effort [`UsageCollector::try_ml_job_metrics`]; empty on failure
    #[instrument(skip(self))]
    pub async fn ml_job_metrics(&self) -> Vec<JobMetric> {
        let result = self.try_ml_job_metrics().await;
        self.best_effort("ml_job_metrics", result, Vec::new())
    }
}
