//! Dialogue controller configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the bounded interview loop.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Maximum number of questions the interview asks (1-6).
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,

    /// Company profile key used when detection never resolves one.
    #[serde(default = "default_profile")]
    pub default_profile: String,
}

impl DialogueConfig {
    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=6).contains(&self.max_questions) {
            return Err(ValidationError::InvalidMaxQuestions);
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
            default_profile: default_profile(),
        }
    }
}

fn default_max_questions() -> u32 {
    3
}

fn default_profile() -> String {
    "generic".to_string()
}
