//! # SIEM Telemetry Usage
//!
//! Detection rule and ML job usage collection.
//!
//! ## Usage counters
//!
//! ```text
//!            enabled   disabled
//! elastic      e_on      e_off
//! custom       c_on      c_off
//! ```
//!
//! Rules are elastic when tagged `__internal_immutable:true`; jobs are elastic
//! when an installed ML module ships them. The four cells always sum to the
//! number of rules (or security jobs) seen.
//!
//! ## Metrics
//!
//! - Prebuilt rules joined with their 24h alert counts and case attachments
//! - Security job stats joined with job details and datafeed stats
//!
//! Collection is best effort: an upstream failure yields a zeroed summary or
//! an empty list, never an error.

pub mod aggregation;
pub mod backend;
pub mod collector;
pub mod config;
pub mod metrics;

pub use backend::{MlProvider, SavedObjectsStore, SearchBackend, SnapshotBackend};
pub use collector::UsageCollector;
pub use config::CollectorConfig;
pub use metrics::CollectorMetrics;
