//! Voice utterance source: endpointer capture plus transcription.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::AudioConfig;
use crate::domain::audio::{AudioEndpointer, CancelToken, TerminationReason};
use crate::ports::{
    AudioSource, CaptureError, SpeechRecognizer, Utterance, UtteranceSource,
};

/// Acquires utterances by endpointing an audio source and transcribing
/// the captured buffer.
///
/// Capture itself is blocking by design; real microphone adapters should
/// hand this source a pre-buffered stream.
pub struct VoiceUtteranceSource<S: AudioSource + Send> {
    source: S,
    recognizer: Arc<dyn SpeechRecognizer>,
    endpointer: AudioEndpointer,
    cancel: CancelToken,
}

impl<S: AudioSource + Send> VoiceUtteranceSource<S> {
    /// Creates a voice source.
    pub fn new(source: S, recognizer: Arc<dyn SpeechRecognizer>, config: AudioConfig) -> Self {
        Self {
            source,
            recognizer,
            endpointer: AudioEndpointer::new(config),
            cancel: CancelToken::new(),
        }
    }

    /// A token that cancels the in-progress capture when signalled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

#[async_trait]
impl<S: AudioSource + Send> UtteranceSource for VoiceUtteranceSource<S> {
    async fn next_utterance(&mut self, _prompt: &str) -> Result<Utterance, CaptureError> {
        let capture = self.endpointer.capture(&mut self.source, &self.cancel);

        match capture.reason() {
            TerminationReason::UserCancelled => return Err(CaptureError::Cancelled),
            TerminationReason::SourceError if !capture.has_audio() => {
                return Err(CaptureError::NoAudio)
            }
            _ if !capture.has_audio() => return Err(CaptureError::NoAudio),
            _ => {}
        }

        debug!(
            chunks = capture.chunks_collected(),
            reason = ?capture.reason(),
            "transcribing captured utterance"
        );
        let transcription = self
            .recognizer
            .transcribe(capture.samples(), self.source.sample_rate())
            .await?;
        Ok(Utterance::voice(
            transcription.text,
            transcription.confidence,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::audio::ScriptedAudioSource;
    use crate::ports::{AudioSourceError, Transcription, TranscriptionError};

    struct FixedRecognizer {
        text: &'static str,
    }

    #[async_trait]
    impl SpeechRecognizer for FixedRecognizer {
        async fn transcribe(
            &self,
            _samples: &[i16],
            _sample_rate: u32,
        ) -> Result<Transcription, TranscriptionError> {
            Ok(Transcription::new(self.text, 0.93))
        }
    }

    #[tokio::test]
    async fn captured_speech_is_transcribed() {
        let mut source = VoiceUtteranceSource::new(
            ScriptedAudioSource::speech_then_silence(12, 25),
            Arc::new(FixedRecognizer { text: "my parcel is missing" }),
            AudioConfig::default(),
        );
        let utterance = source.next_utterance("question").await.unwrap();
        assert_eq!(utterance.text, "my parcel is missing");
        assert_eq!(utterance.transcription_confidence, 0.93);
    }

    #[tokio::test]
    async fn broken_device_reports_no_audio() {
        let mut source = VoiceUtteranceSource::new(
            ScriptedAudioSource::broken(AudioSourceError::Device("no mic".to_string())),
            Arc::new(FixedRecognizer { text: "unused" }),
            AudioConfig::default(),
        );
        assert_eq!(
            source.next_utterance("question").await,
            Err(CaptureError::NoAudio)
        );
    }

    #[tokio::test]
    async fn cancellation_is_reported_distinctly() {
        let mut source = VoiceUtteranceSource::new(
            ScriptedAudioSource::speech_then_silence(500, 0),
            Arc::new(FixedRecognizer { text: "unused" }),
            AudioConfig::default(),
        );
        source.cancel_token().cancel();
        assert_eq!(
            source.next_utterance("question").await,
            Err(CaptureError::Cancelled)
        );
    }
}
