//! Detection rule usage and metrics

use siem_telemetry_common::decode;
use siem_telemetry_common::types::search::{
    AlertCountsResponse, CaseComment, RuleDocument, SavedObjectsFindResponse, SearchResponse,
};
use siem_telemetry_common::{DetectionRulesUsage, Result, RuleMetric, UsageSummary};
use tracing::{debug, instrument};

use super::UsageCollector;
use crate::aggregation::{
    alert_counts_by_rule, build_rule_metrics, classify_and_count, classify_rule,
    count_case_attachments,
};
use crate::backend::{FindRequest, SearchRequest};

impl UsageCollector {
    /// Count detection rules by provenance and enabled state
    pub async fn try_rules_usage(&self) -> Result<DetectionRulesUsage> {
        let request = SearchRequest::rule_usage(&self.config.rules_index, self.config.page_size);
        let raw = self.search.search(&request).await?;
        let response: SearchResponse<RuleDocument> = decode("rule usage", raw)?;

        let hits = response.into_hits();
        debug!(hits = hits.len(), index = %request.index, "Fetched rules for usage");
        Ok(classify_and_count(hits, |hit| classify_rule(hit.source.as_ref())))
    }

    /// Best-effort [`UsageCollector::try_rules_usage`]; zeroed on failure
    #[instrument(skip(self))]
    pub async fn rules_usage(&self) -> DetectionRulesUsage {
        let result = self.try_rules_usage().await;
        self.best_effort("rules_usage", result, UsageSummary::zeroed())
    }

    /// One metric row per prebuilt rule, joined with daily alert and case counts
    pub async fn try_detection_rule_metrics(&self) -> Result<Vec<RuleMetric>> {
        let rules_request =
            SearchRequest::rule_definitions(&self.config.rules_index, self.config.page_size, &[]);
        let alerts_request = SearchRequest::daily_alert_counts(
            &self.config.signals_index,
            self.config.alert_bucket_size,
        );
        let cases_request = FindRequest::alert_case_comments(self.config.page_size);

        let (rules_raw, alerts_raw, cases_raw) = futures::try_join!(
            self.search.search(&rules_request),
            self.search.search(&alerts_request),
            self.saved_objects.find(&cases_request),
        )?;

        let rules: SearchResponse<RuleDocument> = decode("rule definitions", rules_raw)?;
        let alerts: AlertCountsResponse = decode("daily alert counts", alerts_raw)?;
        let cases: SavedObjectsFindResponse<CaseComment> = decode("case comments", cases_raw)?;

        let alert_counts = alert_counts_by_rule(alerts.into_buckets());
        let case_counts = count_case_attachments(cases.saved_objects.iter().map(|o| &o.attributes));

        let metrics = build_rule_metrics(
            rules.into_hits().into_iter().filter_map(|hit| hit.source),
            &alert_counts,
            &case_counts,
        );
        debug!(
            rules = metrics.len(),
            alerting_rules = alert_counts.len(),
            case_comments = cases.saved_objects.len(),
            "Built detection rule metrics"
        );
        Ok(metrics)
    }

    /// Best-effort [`UsageCollector::try_detection_rule_metrics`]; empty on failure
    #[instrument(skip(self))]
    pub async fn detection_rule_metrics(&self) -> Vec<RuleMetric> {
        let result = self.try_detection_rule_metrics().await;
        self.best_effort("detection_rule_metrics", result, Vec::new())
    }
}
