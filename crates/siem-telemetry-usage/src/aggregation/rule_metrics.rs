//! Detection rule metric join

use siem_telemetry_common::types::rule::has_immutable_tag;
use siem_telemetry_common::types::search::{CaseComment, RuleDocument, TermsBucket};
use siem_telemetry_common::RuleMetric;
use std::collections::HashMap;

/// Per-rule counters keyed by rule id
pub type RuleCounts = HashMap<String, u64>;

/// Count case attachments per rule id. Comments with no rule are skipped.
pub fn count_case_attachments<'a, I>(comments: I) -> RuleCounts
where
    I: IntoIterator<Item = &'a CaseComment>,
{
    comments
        .into_iter()
        .filter_map(CaseComment::rule_id)
        .fold(RuleCounts::new(), |mut counts, rule_id| {
            *counts.entry(rule_id.to_string()).or_insert(0) += 1;
            counts
        })
}

/// Index alert aggregation buckets by rule id
pub fn alert_counts_by_rule(buckets: Vec<TermsBucket>) -> RuleCounts {
    buckets.into_iter().map(|b| (b.key, b.doc_count)).collect()
}

/// Build one [`RuleMetric`] per prebuilt rule, in input order.
///
/// Custom rules are dropped entirely. Counts missing from either map are zero.
pub fn build_rule_metrics<I>(
    rules: I,
    alert_counts: &RuleCounts,
    case_counts: &RuleCounts,
) -> Vec<RuleMetric>
where
    I: IntoIterator<Item = RuleDocument>,
{
    rules
        .into_iter()
        .filter(|doc| has_immutable_tag(&doc.alert.tags))
        .map(|doc| {
            let alert = doc.alert;
            let params = alert.params.unwrap_or_default();
            let rule_id = params.rule_id.unwrap_or_default();

            RuleMetric {
                alert_count_daily: alert_counts.get(&rule_id).copied().unwrap_or(0),
                cases_count_daily: case_counts.get(&rule_id).copied().unwrap_or(0),
                rule_name: alert.name,
                rule_type: params.rule_type,
                rule_version: params.version,
                enabled: alert.enabled.unwrap_or(false),
                created_on: alert.created_at,
                updated_on: alert.updated_at,
                rule_id,
            }
        })
        .collect()
}
