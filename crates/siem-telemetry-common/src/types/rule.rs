//! Detection rule metrics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::INTERNAL_IMMUTABLE_KEY;

/// One prebuilt detection rule with its daily activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_version: Option<u64>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    /// Alerts raised by the rule in the last 24 hours
    pub alert_count_daily: u64,
    /// Alerts of the rule attached to cases
    pub cases_count_daily: u64,
}

/// True when the tags mark a rule from the prebuilt rule pack
pub fn has_immutable_tag<S: AsRef<str>>(tags: &[S]) -> bool {
    tags.iter().any(|tag| {
        tag.as_ref()
            .strip_prefix(INTERNAL_IMMUTABLE_KEY)
            .map_or(false, |rest| rest == ":true")
    })
}
