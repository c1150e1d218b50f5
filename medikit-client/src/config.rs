//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Medikit client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the health-tracking backend
    pub base_url: String,
    /// Fixed per-request timeout (seconds); there is no retry
    pub timeout_secs: u64,
    /// How long notifications stay on screen (ms)
    pub display_duration_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8003".to_string(),
            timeout_secs: 10,
            display_duration_ms: crate::notify::DISPLAY_DURATION_MS,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// The request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
