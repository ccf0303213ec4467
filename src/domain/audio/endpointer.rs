//! Energy-based voice-activity endpointing.
//!
//! Reads fixed-size chunks from an audio source and decides when the
//! utterance has ended, without a pre-known duration.

use tracing::{debug, warn};

use crate::config::AudioConfig;
use crate::ports::AudioSource;

use super::{AudioChunk, CancelToken};

/// Peak amplitude below which a capture is considered too quiet and gets a
/// bounded linear gain.
const QUIET_PEAK_FLOOR: i16 = 1_000;

/// Target peak the gain aims for on quiet captures.
const GAIN_TARGET_PEAK: f64 = 5_000.0;

/// Upper bound on the gain factor, so quiet noise is never amplified into
/// clipping.
const MAX_GAIN: f64 = 10.0;

/// Why a capture stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The silence window elapsed after enough audio was collected.
    SilenceDetected,
    /// The hard chunk ceiling was reached.
    MaxDurationReached,
    /// The cancel token was signalled mid-capture.
    UserCancelled,
    /// The source failed or produced nothing.
    SourceError,
}

/// The outcome of one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    samples: Vec<i16>,
    reason: TerminationReason,
    chunks_collected: usize,
}

impl CaptureResult {
    /// The sentinel result for a capture that produced no audio.
    ///
    /// Callers degrade to a text-input turn instead of failing.
    pub fn no_audio(reason: TerminationReason) -> Self {
        Self {
            samples: Vec::new(),
            reason,
            chunks_collected: 0,
        }
    }

    /// The captured samples, concatenated in arrival order.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Why the capture stopped.
    pub fn reason(&self) -> TerminationReason {
        self.reason
    }

    /// Number of chunks collected before stopping.
    pub fn chunks_collected(&self) -> usize {
        self.chunks_collected
    }

    /// Returns true if any audio was captured.
    pub fn has_audio(&self) -> bool {
        !self.samples.is_empty()
    }
}

/// Captures bounded utterances from a chunked audio source.
#[derive(Debug, Clone)]
pub struct AudioEndpointer {
    config: AudioConfig,
}

impl AudioEndpointer {
    /// Creates an endpointer with the given configuration.
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    /// Reads chunks until the utterance ends.
    ///
    /// Stop conditions, checked per chunk:
    /// - cancellation token signalled -> `UserCancelled`
    /// - silence run reached `max_silence_chunks` after the minimum-capture
    ///   window -> `SilenceDetected` (chunks inside the window never count
    ///   toward the silence run, so a capture is always at least
    ///   `min_chunks_before_stop + max_silence_chunks` chunks long when it
    ///   ends in silence)
    /// - `max_chunks` ceiling reached -> `MaxDurationReached`
    /// - source exhaustion or failure -> end of capture; a failure with an
    ///   empty buffer yields the no-audio sentinel
    ///
    /// Never returns an error: device problems become `SourceError` results
    /// so the caller can fall back to text input.
    pub fn capture(&self, source: &mut dyn AudioSource, cancel: &CancelToken) -> CaptureResult {
        let mut samples: Vec<i16> = Vec::new();
        let mut chunks_collected = 0usize;
        let mut silence_run = 0usize;

        let reason = loop {
            if cancel.is_cancelled() {
                break TerminationReason::UserCancelled;
            }

            let chunk = match source.next_chunk() {
                Ok(Some(chunk)) => chunk,
                Ok(None) => {
                    // Stream ended on its own; an exhausted-but-audible
                    // capture counts as a silence stop.
                    if samples.is_empty() {
                        break TerminationReason::SourceError;
                    }
                    break TerminationReason::SilenceDetected;
                }
                Err(err) => {
                    warn!(error = %err, "audio source failed mid-capture");
                    break TerminationReason::SourceError;
                }
            };

            chunks_collected += 1;
            let is_silent = chunk.rms() < self.config.silence_rms_threshold;
            samples.extend_from_slice(chunk.samples());

            if chunks_collected > self.config.min_chunks_before_stop {
                if is_silent {
                    silence_run += 1;
                } else {
                    silence_run = 0;
                }
                if silence_run >= self.config.max_silence_chunks {
                    break TerminationReason::SilenceDetected;
                }
            }

            if chunks_collected >= self.config.max_chunks {
                break TerminationReason::MaxDurationReached;
            }
        };

        if samples.is_empty() {
            return CaptureResult::no_audio(reason);
        }

        apply_quiet_gain(&mut samples);
        debug!(chunks = chunks_collected, ?reason, "capture finished");

        CaptureResult {
            samples,
            reason,
            chunks_collected,
        }
    }
}

/// Boosts a too-quiet buffer with a bounded linear gain.
fn apply_quiet_gain(samples: &mut [i16]) {
    let peak = samples.iter().map(|s| s.saturating_abs()).max().unwrap_or(0);
    if peak == 0 || peak >= QUIET_PEAK_FLOOR {
        return;
    }
    let gain = (GAIN_TARGET_PEAK / peak as f64).min(MAX_GAIN);
    for sample in samples.iter_mut() {
        let boosted = (*sample as f64 * gain).round();
        *sample = boosted.clamp(i16::MIN as f64, i16::MAX as f64) as i16;
    }
}
