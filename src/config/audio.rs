//! Audio capture and endpointing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the voice-activity endpointer.
///
/// Chunks are 100 ms of PCM samples, so the defaults read as: stop after
/// 2 s of continuous silence once at least 1 s has been captured, with a
/// 10 minute hard ceiling.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// PCM sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// RMS energy below which a chunk counts as silence.
    #[serde(default = "default_silence_rms_threshold")]
    pub silence_rms_threshold: f64,

    /// Minimum chunks collected before silence may stop the capture.
    #[serde(default = "default_min_chunks_before_stop")]
    pub min_chunks_before_stop: usize,

    /// Consecutive silent chunks that end an utterance.
    #[serde(default = "default_max_silence_chunks")]
    pub max_silence_chunks: usize,

    /// Hard ceiling on chunks collected in one capture.
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

impl AudioConfig {
    /// Returns a copy with a tighter hard ceiling for short prompts.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Validate audio configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sample_rate == 0 {
            return Err(ValidationError::InvalidSampleRate);
        }
        if self.min_chunks_before_stop < 10 {
            return Err(ValidationError::MinCaptureTooShort);
        }
        if self.max_silence_chunks == 0 {
            return Err(ValidationError::InvalidSilenceWindow);
        }
        if self.max_chunks <= self.min_chunks_before_stop {
            return Err(ValidationError::InvalidChunkCeiling);
        }
        Ok(())
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            silence_rms_threshold: default_silence_rms_threshold(),
            min_chunks_before_stop: default_min_chunks_before_stop(),
            max_silence_chunks: default_max_silence_chunks(),
            max_chunks: default_max_chunks(),
        }
    }
}

fn default_sample_rate() -> u32 {
    44_100
}

fn default_silence_rms_threshold() -> f64 {
    50.0
}

fn default_min_chunks_before_stop() -> usize {
    10
}

fn default_max_silence_chunks() -> usize {
    20
}

fn default_max_chunks() -> usize {
    6_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AudioConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_short_minimum_capture() {
        let config = AudioConfig {
            min_chunks_before_stop: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::MinCaptureTooShort));
    }

    #[test]
    fn rejects_ceiling_below_minimum() {
        let config = AudioConfig {
            max_chunks: 10,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunkCeiling));
    }

    #[test]
    fn with_max_chunks_overrides_ceiling() {
        let config = AudioConfig::default().with_max_chunks(300);
        assert_eq!(config.max_chunks, 300);
        assert!(config.validate().is_ok());
    }
}
