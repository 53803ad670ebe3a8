//! Usage counters
//!
//! A [`UsageSummary`] partitions a population of rules or jobs into
//! elastic (prebuilt) and custom (user authored), each split by enabled
//! state. The four counters always sum to the number of records counted.

use serde::{Deserialize, Serialize};

/// Enabled/disabled counter pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBucket {
    pub enabled: u64,
    pub disabled: u64,
}

impl UsageBucket {
    /// Zeroed bucket
    pub const fn zeroed() -> Self {
        Self {
            enabled: 0,
            disabled: 0,
        }
    }

    /// Count one record in the enabled or disabled cell
    pub fn record(&mut self, is_enabled: bool) {
        if is_enabled {
            self.enabled += 1;
        } else {
            self.disabled += 1;
        }
    }

    /// Sum of both cells
    pub fn total(&self) -> u64 {
        self.enabled + self.disabled
    }
}

/// Classification of one input record along both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// Shipped by the vendor rather than authored by the user
    pub is_elastic: bool,
    /// Currently enabled / running
    pub is_enabled: bool,
}

impl ClassifiedRecord {
    pub fn new(is_elastic: bool, is_enabled: bool) -> Self {
        Self {
            is_elastic,
            is_enabled,
        }
    }
}

/// Elastic/custom × enabled/disabled counter table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub elastic: UsageBucket,
    pub custom: UsageBucket,
}

/// Usage of detection rules
pub type DetectionRulesUsage = UsageSummary;

/// Usage of ML anomaly detection jobs
pub type MlJobsUsage = UsageSummary;

impl UsageSummary {
    /// All four counters at zero
    pub const fn zeroed() -> Self {
        Self {
            elastic: UsageBucket::zeroed(),
            custom: UsageBucket::zeroed(),
        }
    }

    /// Route a classified record into exactly one of the four cells
    pub fn record(&mut self, record: ClassifiedRecord) {
        match (record.is_elastic, record.is_enabled) {
            (true, true) => self.elastic.enabled += 1,
            (true, false) => self.elastic.disabled += 1,
            (false, true) => self.custom.enabled += 1,
            (false, false) => self.custom.disabled += 1,
        }
    }

    /// Consuming variant of [`UsageSummary::record`], for folds
    pub fn with(mut self, record: ClassifiedRecord) -> Self {
        self.record(record);
        self
    }

    /// Number of records counted
    pub fn total(&self) -> u64 {
        self.elastic.total() + self.custom.total()
    }

    pub fn is_zeroed(&self) -> bool {
        *self == Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_summary() {
        let summary = UsageSummary::zeroed();
        assert_eq!(summary, UsageSummary::default());
        assert_eq!(summary.total(), 0);
        assert!(summary.is_zeroed());
    }

    #[test]
    fn test_record_routes_each_pair() {
        let mut summary = UsageSummary::zeroed();
        summary.record(ClassifiedRecord::new(true, true));
        summary.record(ClassifiedRecord::new(true, false));
        summary.record(ClassifiedRecord::new(true, false));
        summary.record(ClassifiedRecord::new(false, true));
        summary.record(ClassifiedRecord::new(false, false));

        assert_eq!(summary.elastic, UsageBucket { enabled: 1, disabled: 2 });
        assert_eq!(summary.custom, UsageBucket { enabled: 1, disabled: 1 });
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_serialized_shape() {
        let summary = UsageSummary::zeroed().with(ClassifiedRecord::new(false, true));
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "elastic": { "enabled": 0, "disabled": 0 },
                "custom": { "enabled": 1, "disabled": 0 }
            })
        );
    }
}
