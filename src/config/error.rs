//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("max_questions must be between 1 and 6")]
    InvalidMaxQuestions,

    #[error("confidence_threshold must be between 0.0 and 1.0")]
    InvalidConfidenceThreshold,

    #[error("Invalid collaborator timeout")]
    InvalidTimeout,

    #[error("min_chunks_before_stop must be at least 10")]
    MinCaptureTooShort,

    #[error("max_silence_chunks must be positive")]
    InvalidSilenceWindow,

    #[error("max_chunks must exceed min_chunks_before_stop")]
    InvalidChunkCeiling,

    #[error("Sample rate must be positive")]
    InvalidSampleRate,

    #[error("authorization_ceiling must be positive")]
    InvalidAuthorizationCeiling,

    #[error("max_conversation_turns must be positive")]
    InvalidConversationCap,
}
