//! Error types for usage telemetry
//!
//! Every failure of an upstream collaborator lands in [`UsageError`]. The
//! collector decides whether to surface it or to substitute a zeroed result.

use thiserror::Error;

/// Result type alias using UsageError
pub type Result<T> = std::result::Result<T, UsageError>;

/// Unified error type for usage collection
#[derive(Debug, Error)]
pub enum UsageError {
    // Search backend errors
    #[error("Search error on index {index}: {reason}")]
    Search { index: String, reason: String },

    // Saved-object store errors
    #[error("Saved object error for type {object_type}: {reason}")]
    SavedObjects { object_type: String, reason: String },

    // Machine learning provider errors
    #[error("ML provider error in {operation}: {reason}")]
    Ml {
        operation: &'static str,
        reason: String,
    },

    // Response did not match the expected schema
    #[error("Failed to decode {source_name} response: {reason}")]
    Decode {
        source_name: &'static str,
        reason: String,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Metrics registry errors
    #[error("Metrics error: {0}")]
    Metrics(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UsageError {
    /// Short label of the failing source, used as a metrics label
    pub fn source_label(&self) -> &'static str {
        match self {
            UsageError::Search { .. } => "search",
            UsageError::SavedObjects { .. } => "saved_objects",
            UsageError::Ml { .. } => "ml",
            UsageError::Decode { .. } => "decode",
            UsageError::Config(_) => "config",
            UsageError::Metrics(_) => "metrics",
            UsageError::Serialization(_) => "serialization",
            UsageError::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for UsageError {
    fn from(err: serde_json::Error) -> Self {
        UsageError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for UsageError {
    fn from(err: std::io::Error) -> Self {
        UsageError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for UsageError {
    fn from(err: anyhow::Error) -> Self {
        UsageError::Internal(err.to_string())
    }
}
