//! Failover utterance source.
//!
//! Implements the degradation policy: try the primary (voice) source, and
//! on capture or transcription failure retry exactly once via the text
//! fallback before the turn counts as failed. Cancellation is deliberate
//! and is never retried.

use async_trait::async_trait;
use tracing::warn;

use crate::ports::{CaptureError, Utterance, UtteranceSource};

/// Wraps a primary utterance source with a single text fallback.
pub struct FailoverUtteranceSource<P, F>
where
    P: UtteranceSource,
    F: UtteranceSource,
{
    primary: P,
    fallback: F,
}

impl<P, F> FailoverUtteranceSource<P, F>
where
    P: UtteranceSource,
    F: UtteranceSource,
{
    /// Creates the failover pair.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> UtteranceSource for FailoverUtteranceSource<P, F>
where
    P: UtteranceSource + Send,
    F: UtteranceSource + Send,
{
    async fn next_utterance(&mut self, prompt: &str) -> Result<Utterance, CaptureError> {
        match self.primary.next_utterance(prompt).await {
            Ok(utterance) => Ok(utterance),
            Err(CaptureError::Cancelled) => Err(CaptureError::Cancelled),
            Err(err) => {
                warn!(error = %err, "primary utterance source failed, retrying via fallback");
                self.fallback.next_utterance(prompt).await
            }
        }
    }
}
