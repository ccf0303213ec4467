//! Audio Source Port - Interface for chunked audio capture devices.
//!
//! The endpointer pulls fixed-size PCM chunks from this port. Real
//! adapters wrap a microphone input stream; test adapters replay scripted
//! chunk sequences.

use thiserror::Error;

use crate::domain::audio::AudioChunk;

/// Errors raised by an audio capture device or stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AudioSourceError {
    #[error("audio device error: {0}")]
    Device(String),

    #[error("audio input buffer overflowed")]
    Overflow,
}

/// Port for a blocking, chunked audio source.
///
/// `next_chunk` blocks until one chunk of samples is available. `Ok(None)`
/// signals the stream ended on its own (file sources, hang-ups); errors
/// are device failures the endpointer converts into its no-audio sentinel.
pub trait AudioSource {
    /// Reads the next chunk, blocking until it is available.
    fn next_chunk(&mut self) -> Result<Option<AudioChunk>, AudioSourceError>;

    /// The PCM sample rate this source produces.
    fn sample_rate(&self) -> u32;
}
