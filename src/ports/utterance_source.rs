//! Utterance Source Port - Interface for acquiring one user utterance.
//!
//! Adapters compose the voice path (endpointer + recognizer), a typed-text
//! path for degraded mode, and a failover wrapper implementing the
//! retry-once degradation policy.

use async_trait::async_trait;
use thiserror::Error;

use super::TranscriptionError;

/// How an utterance reached the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Voice,
    Text,
}

/// One acquired user utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Transcription confidence; 1.0 for typed input.
    pub transcription_confidence: f64,
    pub mode: InputMode,
}

impl Utterance {
    /// Creates a voice utterance.
    pub fn voice(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            transcription_confidence: confidence.clamp(0.0, 1.0),
            mode: InputMode::Voice,
        }
    }

    /// Creates a typed utterance.
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            transcription_confidence: 1.0,
            mode: InputMode::Text,
        }
    }

    /// Returns true if the utterance carries no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Errors raised while acquiring an utterance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("no audio captured")]
    NoAudio,

    #[error("audio capture failed: {0}")]
    Source(String),

    #[error("capture cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error("no input source available")]
    Exhausted,
}

/// Port for acquiring the next user utterance.
#[async_trait]
pub trait UtteranceSource: Send {
    /// Acquires one utterance; `prompt` is the question just asked, for
    /// sources that display or announce it.
    async fn next_utterance(&mut self, prompt: &str) -> Result<Utterance, CaptureError>;
}
