//! ML job metric join

use siem_telemetry_common::datafeed_id_for;
use siem_telemetry_common::types::ml_job::{DatafeedStats, JobDetail, JobStats};
use siem_telemetry_common::{DatafeedMetric, JobMetric};
use std::collections::HashMap;

/// Build one [`JobMetric`] per job stat entry, in input order.
///
/// Details are joined by job id and datafeed stats by the derived
/// `datafeed-<job_id>` id. A missing match leaves the joined fields empty.
pub fn build_job_metrics(
    job_stats: Vec<JobStats>,
    job_details: Vec<JobDetail>,
    datafeed_stats: Vec<DatafeedStats>,
) -> Vec<JobMetric> {
    let details: HashMap<String, JobDetail> = job_details
        .into_iter()
        .map(|d| (d.job_id.clone(), d))
        .collect();
    let datafeeds: HashMap<String, DatafeedStats> = datafeed_stats
        .into_iter()
        .map(|d| (d.datafeed_id.clone(), d))
        .collect();

    job_stats
        .into_iter()
        .map(|stat| {
            let detail = details.get(&stat.job_id);
            let datafeed = datafeeds.get(&datafeed_id_for(&stat.job_id));

            JobMetric {
                open_time: stat.open_time,
                create_time: detail.and_then(|d| d.create_time),
                finished_time: detail.and_then(|d| d.finished_time),
                state: stat.state,
                data_counts: stat.data_counts,
                model_size_stats: stat.model_size_stats,
                timing_stats: stat.timing_stats,
                datafeed: datafeed.map(datafeed_metric).unwrap_or_default(),
                job_id: stat.job_id,
            }
        })
        .collect()
}

fn datafeed_metric(stats: &DatafeedStats) -> DatafeedMetric {
    DatafeedMetric {
        datafeed_id: Some(stats.datafeed_id.clone()),
        state: stats.state.clone(),
        timing_stats: stats.timing_stats.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siem_telemetry_common::types::ml_job::{
        DataCounts, DatafeedTimingMetric, JobTimingStats, ModelSizeStats,
    };

    fn stat(job_id: &str) -> JobStats {
        JobStats {
            job_id: job_id.to_string(),
            state: Some("opened".to_string()),
            open_time: Some("2s".to_string()),
            data_counts: DataCounts {
                input_bytes: Some(1024),
                ..Default::default()
            },
            model_size_stats: ModelSizeStats::default(),
            timing_stats: JobTimingStats::default(),
        }
    }

    fn detail(job_id: &str, create_time: i64) -> JobDetail {
        JobDetail {
            job_id: job_id.to_string(),
            create_time: Some(create_time),
            finished_time: None,
        }
    }

    fn datafeed(job_id: &str) -> DatafeedStats {
        DatafeedStats {
            datafeed_id: datafeed_id_for(job_id),
            state: Some("started".to_string()),
            timing_stats: Some(DatafeedTimingMetric {
                search_count: Some(7),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_join_by_job_id() {
        let metrics = build_job_metrics(
            vec![stat("rare_process")],
            vec![detail("rare_process", 1_600_000_000_000)],
            vec![datafeed("rare_process")],
        );

        assert_eq!(metrics.len(), 1);
        let m = &metrics[0];
        assert_eq!(m.job_id, "rare_process");
        assert_eq!(m.create_time, Some(1_600_000_000_000));
        assert_eq!(m.data_counts.input_bytes, Some(1024));
        assert_eq!(m.datafeed.datafeed_id.as_deref(), Some("datafeed-rare_process"));
        assert_eq!(m.datafeed.state.as_deref(), Some("started"));
        assert_eq!(m.datafeed.timing_stats.search_count, Some(7));
    }

    #[test]
    fn test_missing_joins_leave_fields_empty() {
        let metrics = build_job_metrics(vec![stat("orphan")], vec![], vec![datafeed("other")]);

        let m = &metrics[0];
        assert_eq!(m.create_time, None);
        assert_eq!(m.finished_time, None);
        assert_eq!(m.datafeed, DatafeedMetric::default());
    }

    #[test]
    fn test_preserves_input_order() {
        let metrics = build_job_metrics(
            vec![stat("c"), stat("a"), stat("b")],
            vec![detail("a", 1), detail("b", 2), detail("c", 3)],
            vec![],
        );
        let ids: Vec<&str> = metrics.iter().map(|m| m.job_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(metrics[0].create_time, Some(3));
    }
}
