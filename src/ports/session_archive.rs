//! Session Archive Port - Persisted session artifacts.
//!
//! Conversation records are written once per terminal session; the
//! escalation log is append-only, one JSON object per line.

use thiserror::Error;

use crate::domain::case::ConversationRecord;
use crate::domain::escalation::EscalationLogEntry;

/// Errors raised when persisting session artifacts.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize artifact: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for persisting session artifacts.
pub trait SessionArchive: Send + Sync {
    /// Stores the conversation record of a terminal session.
    fn store_conversation(&self, record: &ConversationRecord) -> Result<(), ArchiveError>;

    /// Appends one escalation entry to the escalation log.
    fn append_escalation(&self, entry: &EscalationLogEntry) -> Result<(), ArchiveError>;
}
