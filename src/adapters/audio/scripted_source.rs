//! Scripted audio source for tests and demos.

use std::collections::VecDeque;

use crate::domain::audio::AudioChunk;
use crate::ports::{AudioSource, AudioSourceError};

/// Replays a fixed sequence of chunks, then reports stream end.
///
/// An optional injected error fires after the queue drains, for failure
/// path testing.
#[derive(Debug)]
pub struct ScriptedAudioSource {
    chunks: VecDeque<AudioChunk>,
    sample_rate: u32,
    final_error: Option<AudioSourceError>,
}

impl ScriptedAudioSource {
    /// Creates a source that replays `chunks` at 44.1 kHz.
    pub fn new(chunks: Vec<AudioChunk>) -> Self {
        Self {
            chunks: chunks.into(),
            sample_rate: 44_100,
            final_error: None,
        }
    }

    /// A source that fails immediately.
    pub fn broken(error: AudioSourceError) -> Self {
        Self {
            chunks: VecDeque::new(),
            sample_rate: 44_100,
            final_error: Some(error),
        }
    }

    /// Injects an error to be raised once the scripted chunks run out.
    pub fn with_final_error(mut self, error: AudioSourceError) -> Self {
        self.final_error = Some(error);
        self
    }

    /// Overrides the reported sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Builds the canonical test utterance: `loud` speech chunks followed
    /// by `silent` trailing silence.
    pub fn speech_then_silence(loud: usize, silent: usize) -> Self {
        let mut chunks = vec![AudioChunk::new(vec![2_000; 16]); loud];
        chunks.extend(std::iter::repeat(AudioChunk::silent(16)).take(silent));
        Self::new(chunks)
    }
}

impl AudioSource for ScriptedAudioSource {
    fn next_chunk(&mut self) -> Result<Option<AudioChunk>, AudioSourceError> {
        if let Some(chunk) = self.chunks.pop_front() {
            return Ok(Some(chunk));
        }
        match self.final_error.take() {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
