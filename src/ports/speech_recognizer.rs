//! Speech Recognizer Port - Interface for speech-to-text engines.

use async_trait::async_trait;
use thiserror::Error;

/// Sentinel text returned when a buffer contains no recognizable speech.
///
/// Recognizers must return this rather than erroring on inaudible input,
/// so an empty utterance stays an ordinary (low-confidence) turn.
pub const NO_SPEECH_SENTINEL: &str = "[no speech detected]";

/// A transcription result.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    /// Recognizer-reported confidence in [0, 1].
    pub confidence: f64,
}

impl Transcription {
    /// Creates a transcription.
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The no-speech sentinel result.
    pub fn no_speech() -> Self {
        Self {
            text: NO_SPEECH_SENTINEL.to_string(),
            confidence: 0.0,
        }
    }

    /// Returns true if this is the no-speech sentinel.
    pub fn is_no_speech(&self) -> bool {
        self.text == NO_SPEECH_SENTINEL || self.text.trim().is_empty()
    }
}

/// Errors raised by a speech recognition engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("speech recognizer failed: {0}")]
    Failed(String),

    #[error("speech recognizer timed out after {0}s")]
    Timeout(u64),
}

/// Port for speech-to-text engines.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribes a PCM buffer.
    async fn transcribe(
        &self,
        samples: &[i16],
        sample_rate: u32,
    ) -> Result<Transcription, TranscriptionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_speech_sentinel_is_detected() {
        assert!(Transcription::no_speech().is_no_speech());
        assert!(Transcription::new("   ", 0.5).is_no_speech());
        assert!(!Transcription::new("hello there", 0.5).is_no_speech());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Transcription::new("hi", 1.7).confidence, 1.0);
        assert_eq!(Transcription::new("hi", -0.2).confidence, 0.0);
    }
}
