//! Timeout wrapper for the understanding collaborator.
//!
//! Every call gets a caller-enforced deadline; elapsing is reported as an
//! ordinary collaborator failure, so downstream fallback paths apply and
//! a slow backend can never hang a turn.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::ports::{TextUnderstanding, UnderstandingError};

/// Wraps a [`TextUnderstanding`] implementation with a per-call timeout.
pub struct TimeoutUnderstanding {
    inner: Arc<dyn TextUnderstanding>,
    timeout: Duration,
}

impl TimeoutUnderstanding {
    /// Wraps `inner` with the given per-call deadline.
    pub fn new(inner: Arc<dyn TextUnderstanding>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl TextUnderstanding for TimeoutUnderstanding {
    async fn extract(&self, prompt: &str) -> Result<String, UnderstandingError> {
        match tokio::time::timeout(self.timeout, self.inner.extract(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "extraction call timed out");
                Err(UnderstandingError::Timeout(self.timeout.as_secs()))
            }
        }
    }

    async fn generate_question(&self, prompt: &str) -> Result<String, UnderstandingError> {
        match tokio::time::timeout(self.timeout, self.inner.generate_question(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "question call timed out");
                Err(UnderstandingError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}
