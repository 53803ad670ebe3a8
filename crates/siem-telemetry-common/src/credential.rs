//! Service credential for calls made on behalf of the telemetry collector
//!
//! Usage collection runs outside any user request. Calls into the ML
//! provider carry an explicit credential instead of borrowing an ambient
//! request context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Principal the collector acts as when calling upstream services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCredential {
    /// Principal name, for logs
    pub principal: String,
    /// Headers forwarded with every upstream request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ServiceCredential {
    /// System identity with no forwarded headers
    pub fn internal() -> Self {
        Self {
            principal: "internal".to_string(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a forwarded header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// True for the header-less system identity
    pub fn is_internal(&self) -> bool {
        self.headers.is_empty()
    }
}

impl Default for ServiceCredential {
    fn default() -> Self {
        Self::internal()
    }
}
