//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CASEFLOW` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use caseflow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod audio;
mod dialogue;
mod error;
mod escalation;

pub use ai::AiConfig;
pub use audio::AudioConfig;
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use escalation::EscalationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has environment defaults, so `AppConfig::load()` succeeds
/// on an empty environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Interview loop configuration (question budget, default profile)
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Endpointer configuration (thresholds, chunk ceilings)
    #[serde(default)]
    pub audio: AudioConfig,

    /// Collaborator call policy (timeout, bounded retries)
    #[serde(default)]
    pub ai: AiConfig,

    /// Escalation thresholds (confidence, monetary ceiling, turn cap)
    #[serde(default)]
    pub escalation: EscalationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CASEFLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CASEFLOW__DIALOGUE__MAX_QUESTIONS=4` -> `dialogue.max_questions = 4`
    /// - `CASEFLOW__AUDIO__MAX_CHUNKS=300` -> `audio.max_chunks = 300`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CASEFLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.dialogue.validate()?;
        self.audio.validate()?;
        self.ai.validate()?;
        self.escalation.validate()?;
        Ok(())
    }
}
