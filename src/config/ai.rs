//! Collaborator call policy configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Policy applied to every external collaborator call (speech recognition,
/// text understanding, plan generation).
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bounded retries on transient failure. One retry, then fallback.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate collaborator call policy
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_timeout() -> u64 {
    20
}

fn default_retries() -> u32 {
    1
}
