//! Requests issued to the search backend and the saved-object store

use serde::Serialize;
use serde_json::{json, Value};
use siem_telemetry_common::{CASE_COMMENT_TYPE, MAX_RESULT_WINDOW, SIGNALS_ID};

/// Field projection used when only rule usage is needed
pub const RULE_USAGE_FILTER_PATH: [&str; 2] = [
    "hits.hits._source.alert.enabled",
    "hits.hits._source.alert.tags",
];

/// Name of the rule-id terms aggregation
pub const ALERT_AGGREGATION: &str = "detectionAlerts";

/// Alert field holding the id of the rule that raised it
pub const ALERT_RULE_ID_FIELD: &str = "signal.rule.rule_id";

/// What a search is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Detection rule documents
    RuleDefinitions,
    /// Zero-hit daily alert aggregation
    AlertCounts,
}

/// Document search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    #[serde(skip)]
    pub kind: SearchKind,
    pub index: String,
    pub size: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_path: Vec<String>,
    pub ignore_unavailable: bool,
    pub body: Value,
}

impl SearchRequest {
    /// Detection rules stored in `index`, optionally projected to `filter_path`
    pub fn rule_definitions(index: &str, size: usize, filter_path: &[&str]) -> Self {
        Self {
            kind: SearchKind::RuleDefinitions,
            index: index.to_string(),
            size: size.min(MAX_RESULT_WINDOW),
            filter_path: filter_path.iter().map(|p| p.to_string()).collect(),
            ignore_unavailable: true,
            body: json!({
                "query": { "bool": { "filter": { "term": { "alert.alertTypeId": SIGNALS_ID } } } }
            }),
        }
    }

    /// Detection rules projected to the enabled flag and tags
    pub fn rule_usage(index: &str, size: usize) -> Self {
        Self::rule_definitions(index, size, &RULE_USAGE_FILTER_PATH)
    }

    /// Zero-hit search counting alerts per rule id over the last 24 hours
    pub fn daily_alert_counts(signals_index: &str, bucket_size: usize) -> Self {
        Self {
            kind: SearchKind::AlertCounts,
            index: signals_index.to_string(),
            size: 0,
            filter_path: Vec::new(),
            ignore_unavailable: true,
            body: json!({
                "aggs": {
                    ALERT_AGGREGATION: {
                        "terms": { "field": ALERT_RULE_ID_FIELD, "size": bucket_size }
                    }
                },
                "query": {
                    "bool": {
                        "filter": [
                            { "range": { "@timestamp": { "gte": "now-24h", "lte": "now" } } }
                        ]
                    }
                }
            }),
        }
    }

    /// True for aggregation-only requests
    pub fn is_aggregation(&self) -> bool {
        self.kind == SearchKind::AlertCounts
    }
}

/// Saved-object find, one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindRequest {
    pub object_type: String,
    pub fields: Vec<String>,
    pub page: usize,
    pub per_page: usize,
    pub filter: Option<String>,
}

impl FindRequest {
    /// Case comments that attach an alert. Only the first page is read.
    pub fn alert_case_comments(per_page: usize) -> Self {
        Self {
            object_type: CASE_COMMENT_TYPE.to_string(),
            fields: Vec::new(),
            page: 1,
            per_page: per_page.min(MAX_RESULT_WINDOW),
            filter: Some(format!("{}.attributes.type: alert", CASE_COMMENT_TYPE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_usage_request() {
        let req = SearchRequest::rule_usage(".kibana", 50_000);
        assert_eq!(req.size, MAX_RESULT_WINDOW);
        assert_eq!(req.filter_path.len(), 2);
        assert!(req.ignore_unavailable);
        assert_eq!(
            req.body["query"]["bool"]["filter"]["term"]["alert.alertTypeId"],
            "siem.signals"
        );
    }

    #[test]
    fn test_daily_alert_counts_uses_given_index() {
        let req = SearchRequest::daily_alert_counts(".siem-signals-default", 500);
        assert_eq!(req.index, ".siem-signals-default");
        assert!(req.is_aggregation());
        assert_eq!(req.body["aggs"]["detectionAlerts"]["terms"]["field"], "signal.rule.rule_id");
        assert_eq!(req.body["aggs"]["detectionAlerts"]["terms"]["size"], 500);
        assert_eq!(
            req.body["query"]["bool"]["filter"][0]["range"]["@timestamp"]["gte"],
            "now-24h"
        );
    }

    #[test]
    fn test_kind_set_by_constructor() {
        let rules = SearchRequest::rule_definitions(".kibana", 0, &[]);
        assert_eq!(rules.kind, SearchKind::RuleDefinitions);
        assert!(!rules.is_aggregation());

        let alerts = SearchRequest::daily_alert_counts(".siem-signals-default", 10);
        assert_eq!(alerts.kind, SearchKind::AlertCounts);

        // kind is routing metadata, not part of the request body
        let value = serde_json::to_value(&rules).unwrap();
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_alert_case_comments() {
        let req = FindRequest::alert_case_comments(10_000);
        assert_eq!(req.object_type, "cases-comments");
        assert_eq!(req.page, 1);
        assert_eq!(req.filter.as_deref(), Some("cases-comments.attributes.type: alert"));
    }
}
