//! Fixed-size PCM chunks and their energy math.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One fixed-size block of signed 16-bit PCM samples (typically 100 ms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    samples: Vec<i16>,
}

impl AudioChunk {
    /// Wraps a block of samples.
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// A chunk of pure digital silence.
    pub fn silent(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    /// The samples in this chunk.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consumes the chunk, returning its samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Root-mean-square energy of the chunk.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_squares: f64 = self
            .samples
            .iter()
            .map(|&s| {
                let v = s as f64;
                v * v
            })
            .sum();
        (sum_squares / self.samples.len() as f64).sqrt()
    }

    /// Peak absolute amplitude of the chunk.
    pub fn peak(&self) -> i16 {
        self.samples
            .iter()
            .map(|s| s.saturating_abs())
            .max()
            .unwrap_or(0)
    }
}

/// Cooperative cancellation signal for a blocking capture.
///
/// Cloned into whatever watches for the stop gesture (keypress, hang-up);
/// the endpointer polls it once per chunk.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_chunk_has_zero_rms() {
        assert_eq!(AudioChunk::silent(100).rms(), 0.0);
    }

    #[test]
    fn constant_amplitude_rms_equals_amplitude() {
        let chunk = AudioChunk::new(vec![100; 50]);
        assert!((chunk.rms() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn peak_handles_negative_extremes() {
        let chunk = AudioChunk::new(vec![10, -500, 20]);
        assert_eq!(chunk.peak(), 500);
    }

    #[test]
    fn peak_of_i16_min_saturates() {
        let chunk = AudioChunk::new(vec![i16::MIN]);
        assert_eq!(chunk.peak(), i16::MAX);
    }

    #[test]
    fn empty_chunk_is_silent() {
        let chunk = AudioChunk::new(vec![]);
        assert_eq!(chunk.rms(), 0.0);
        assert_eq!(chunk.peak(), 0);
    }

    #[test]
    fn cancel_token_propagates_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
