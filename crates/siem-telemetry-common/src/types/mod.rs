//! Core data types for usage telemetry

pub mod ml_job;
pub mod report;
pub mod rule;
pub mod search;
pub mod usage;
