//! Text Understanding Port - Interface for the NLU/LLM collaborator.
//!
//! Both operations return raw text from an untrusted producer; callers
//! must parse defensively (see the extraction module).

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the text understanding collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnderstandingError {
    #[error("understanding collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("understanding collaborator timed out after {0}s")]
    Timeout(u64),

    #[error("understanding collaborator returned an empty response")]
    EmptyResponse,
}

/// Port for text understanding and generation.
#[async_trait]
pub trait TextUnderstanding: Send + Sync {
    /// Requests structured extraction; the response should be JSON but is
    /// treated as untrusted text.
    async fn extract(&self, prompt: &str) -> Result<String, UnderstandingError>;

    /// Requests the wording of the next question.
    async fn generate_question(&self, prompt: &str) -> Result<String, UnderstandingError>;
}
