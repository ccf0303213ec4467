//! Speech Synthesizer Port - Interface for text-to-speech output.
//!
//! Optional collaborator: when no synthesizer is wired, sessions degrade
//! to text-only display. Playback is output-only and never touches
//! session state.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a text-to-speech engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("speech synthesizer unavailable: {0}")]
    Unavailable(String),

    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// Port for text-to-speech engines.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders and plays the given text.
    async fn speak(&self, text: &str) -> Result<(), SynthesisError>;
}
