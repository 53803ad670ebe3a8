//! Search backend and saved-object store response schemas
//!
//! Field projections (`filter_path`) can strip whole levels from a response,
//! so every envelope level is optional and defaults to empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a missing or `null` list as empty
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope of a document search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Option::default")]
    pub hits: Option<Hits<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits<T> {
    #[serde(default = "Vec::new")]
    pub hits: Vec<Hit<T>>,
}

/// One search hit; `_source` may be projected away
#[derive(Debug, Clone, Deserialize)]
pub struct Hit<T> {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_source", default = "Option::default")]
    pub source: Option<T>,
}

impl<T> SearchResponse<T> {
    /// Hits in response order, empty when the envelope was projected away
    pub fn into_hits(self) -> Vec<Hit<T>> {
        self.hits.map(|h| h.hits).unwrap_or_default()
    }
}

/// `_source` of a detection rule saved in the alerting index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub alert: AlertAttributes,
}

/// Attributes of an alerting rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub params: Option<RuleParams>,
}

/// Detection-specific rule parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleParams {
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(rename = "type", default)]
    pub rule_type: Option<String>,
}

/// Zero-hit search carrying the daily alert terms aggregation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertCountsResponse {
    #[serde(default)]
    pub aggregations: Option<AlertAggregations>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertAggregations {
    #[serde(rename = "detectionAlerts", default)]
    pub detection_alerts: Option<TermsAggregation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermsAggregation {
    #[serde(default)]
    pub buckets: Vec<TermsBucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermsBucket {
    pub key: String,
    pub doc_count: u64,
}

impl AlertCountsResponse {
    /// Rule-id buckets, empty when the aggregation is absent
    pub fn into_buckets(self) -> Vec<TermsBucket> {
        self.aggregations
            .and_then(|a| a.detection_alerts)
            .map(|t| t.buckets)
            .unwrap_or_default()
    }
}

/// Page of a saved-object find
#[derive(Debug, Clone, Deserialize)]
pub struct SavedObjectsFindResponse<T> {
    #[serde(default = "Vec::new")]
    pub saved_objects: Vec<SavedObject<T>>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedObject<T> {
    #[serde(default)]
    pub id: Option<String>,
    pub attributes: T,
}

/// Case comment attaching an alert to a case
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseComment {
    #[serde(default)]
    pub association_type: Option<String>,
    #[serde(rename = "type", default)]
    pub comment_type: Option<String>,
    #[serde(default)]
    pub alert_id: Option<String>,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub rule: Option<CaseCommentRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseCommentRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CaseComment {
    /// Rule id the attached alert was raised by
    pub fn rule_id(&self) -> Option<&str> {
        self.rule.as_ref().and_then(|r| r.id.as_deref())
    }
}
