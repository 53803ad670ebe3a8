//! Collector configuration

use serde::{Deserialize, Serialize};
use siem_telemetry_common::{Result, UsageError, MAX_RESULT_WINDOW};
use std::path::PathBuf;
use std::time::Duration;

/// Usage collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Index holding detection rule definitions
    pub rules_index: String,
    /// Index holding detection alerts, used for daily alert counts
    pub signals_index: String,
    /// Page size of rule and case comment lookups
    pub page_size: usize,
    /// Number of rule-id buckets in the daily alert aggregation
    pub alert_bucket_size: usize,
    /// Interval of the background collection loop
    pub collection_interval_secs: u64,
    /// Whether ML usage is collected
    pub ml_enabled: bool,
    /// Recorded responses replayed by the `siem-usage` binary
    pub snapshot_path: Option<PathBuf>,
}

impl CollectorConfig {
    /// Configuration with defaults for everything but the two indices
    pub fn new(rules_index: impl Into<String>, signals_index: impl Into<String>) -> Self {
        Self {
            rules_index: rules_index.into(),
            signals_index: signals_index.into(),
            page_size: MAX_RESULT_WINDOW,
            alert_bucket_size: MAX_RESULT_WINDOW,
            collection_interval_secs: 24 * 60 * 60,
            ml_enabled: true,
            snapshot_path: None,
        }
    }

    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from `SIEM_USAGE_*` keys resolved by `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signals_index = lookup("SIEM_USAGE_SIGNALS_INDEX")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| UsageError::Config("SIEM_USAGE_SIGNALS_INDEX is required".into()))?;
        let rules_index = lookup("SIEM_USAGE_RULES_INDEX").unwrap_or_else(|| ".kibana".to_string());

        let mut cfg = Self::new(rules_index, signals_index);

        if let Some(val) = lookup("SIEM_USAGE_PAGE_SIZE") {
            cfg.page_size = parse("SIEM_USAGE_PAGE_SIZE", &val)?;
        }
        if let Some(val) = lookup("SIEM_USAGE_ALERT_BUCKETS") {
            cfg.alert_bucket_size = parse("SIEM_USAGE_ALERT_BUCKETS", &val)?;
        }
        if let Some(val) = lookup("SIEM_USAGE_INTERVAL_SECS") {
            cfg.collection_interval_secs = parse("SIEM_USAGE_INTERVAL_SECS", &val)?;
        }
        if let Some(val) = lookup("SIEM_USAGE_ML_ENABLED") {
            cfg.ml_enabled = parse("SIEM_USAGE_ML_ENABLED", &val)?;
        }
        if let Some(val) = lookup("SIEM_USAGE_SNAPSHOT") {
            cfg.snapshot_path = Some(PathBuf::from(val));
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject unusable values and clamp page size to the result window
    pub fn validate(&mut self) -> Result<()> {
        if self.rules_index.is_empty() {
            return Err(UsageError::Config("rules_index cannot be empty".into()));
        }
        if self.signals_index.is_empty() {
            return Err(UsageError::Config("signals_index cannot be empty".into()));
        }
        if self.page_size == 0 {
            return Err(UsageError::Config("page_size must be positive".into()));
        }
        if self.alert_bucket_size == 0 {
            return Err(UsageError::Config("alert_bucket_size must be positive".into()));
        }
        if self.collection_interval_secs == 0 {
            return Err(UsageError::Config("collection interval must be positive".into()));
        }
        self.page_size = self.page_size.min(MAX_RESULT_WINDOW);
        Ok(())
    }

    pub fn collection_interval(&self) -> Duration {
        Duration::from_secs(self.collection_interval_secs)
    }
}

fn parse<T: std::str::FromStr>(key: &str, val: &str) -> Result<T> {
    val.trim()
        .parse()
        .map_err(|_| UsageError::Config(format!("invalid value for {}: {:?}", key, val)))
}
