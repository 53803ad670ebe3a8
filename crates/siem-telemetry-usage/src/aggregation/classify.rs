//! Record classification and counting

use siem_telemetry_common::types::ml_job::MlJobSummary;
use siem_telemetry_common::types::rule::has_immutable_tag;
use siem_telemetry_common::types::search::RuleDocument;
use siem_telemetry_common::{ClassifiedRecord, UsageSummary};
use std::collections::HashSet;

/// Fold records into a usage summary, starting from zero.
///
/// Every record lands in exactly one of the four cells, so the summary total
/// always equals the number of records.
pub fn classify_and_count<I, F>(records: I, mut classifier: F) -> UsageSummary
where
    I: IntoIterator,
    F: FnMut(I::Item) -> ClassifiedRecord,
{
    records
        .into_iter()
        .fold(UsageSummary::zeroed(), |usage, record| {
            usage.with(classifier(record))
        })
}

/// Classify a detection rule. A hit without `_source` counts as a disabled
/// custom rule.
pub fn classify_rule(rule: Option<&RuleDocument>) -> ClassifiedRecord {
    match rule {
        Some(doc) => ClassifiedRecord::new(
            has_immutable_tag(&doc.alert.tags),
            doc.alert.enabled.unwrap_or(false),
        ),
        None => ClassifiedRecord::new(false, false),
    }
}

/// Classify a security job. Jobs installed by a module are elastic.
pub fn classify_job(job: &MlJobSummary, module_job_ids: &HashSet<&str>) -> ClassifiedRecord {
    ClassifiedRecord::new(
        module_job_ids.contains(job.id.as_str()),
        is_job_started(&job.job_state, &job.datafeed_state),
    )
}

/// Job or datafeed is coming up
pub fn is_job_loading(job_state: &str, datafeed_state: &str) -> bool {
    job_state == "opening" || datafeed_state == "starting"
}

/// Job counts as enabled while loading or running
pub fn is_job_started(job_state: &str, datafeed_state: &str) -> bool {
    is_job_loading(job_state, datafeed_state)
        || (job_state == "opened" && datafeed_state == "started")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use siem_telemetry_common::types::search::AlertAttributes;
    use siem_telemetry_common::UsageBucket;

    fn rule(tags: &[&str], enabled: Option<bool>) -> RuleDocument {
        RuleDocument {
            alert: AlertAttributes {
                enabled,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    fn job(id: &str, job_state: &str, datafeed_state: &str) -> MlJobSummary {
        MlJobSummary {
            id: id.to_string(),
            groups: vec!["siem".to_string()],
            job_state: job_state.to_string(),
            datafeed_state: datafeed_state.to_string(),
        }
    }

    #[test]
    fn test_empty_input_is_zeroed() {
        let usage = classify_and_count(Vec::<ClassifiedRecord>::new(), |r| r);
        assert_eq!(usage, UsageSummary::zeroed());
    }

    #[test]
    fn test_two_records() {
        let records = vec![
            ClassifiedRecord::new(true, true),
            ClassifiedRecord::new(false, false),
        ];
        let usage = classify_and_count(records, |r| r);
        assert_eq!(usage.elastic, UsageBucket { enabled: 1, disabled: 0 });
        assert_eq!(usage.custom, UsageBucket { enabled: 0, disabled: 1 });
    }

    #[test]
    fn test_classify_rule() {
        let elastic = rule(&["__internal_immutable:true"], Some(true));
        let custom = rule(&["mine"], None);

        assert_eq!(classify_rule(Some(&elastic)), ClassifiedRecord::new(true, true));
        assert_eq!(classify_rule(Some(&custom)), ClassifiedRecord::new(false, false));
        assert_eq!(classify_rule(None), ClassifiedRecord::new(false, false));
    }

    #[test]
    fn test_classify_job() {
        let modules: HashSet<&str> = ["rare_process"].into_iter().collect();

        let running = job("rare_process", "opened", "started");
        let stopped = job("my_job", "closed", "stopped");

        assert_eq!(classify_job(&running, &modules), ClassifiedRecord::new(true, true));
        assert_eq!(classify_job(&stopped, &modules), ClassifiedRecord::new(false, false));
    }

    #[test]
    fn test_is_job_started() {
        assert!(is_job_started("opened", "started"));
        assert!(is_job_started("opening", "stopped"));
        assert!(is_job_started("closed", "starting"));
        assert!(!is_job_started("opened", "stopped"));
        assert!(!is_job_started("closed", "started"));
        assert!(!is_job_started("failed", ""));
    }

    proptest! {
        #[test]
        fn prop_total_equals_input_len(
            pairs in proptest::collection::vec(any::<(bool, bool)>(), 0..500)
        ) {
            let usage = classify_and_count(pairs.iter(), |&(e, en)| ClassifiedRecord::new(e, en));
            prop_assert_eq!(usage.total(), pairs.len() as u64);

            let elastic_enabled = pairs.iter().filter(|&&(e, en)| e && en).count() as u64;
            prop_assert_eq!(usage.elastic.enabled, elastic_enabled);
        }
    }
}
