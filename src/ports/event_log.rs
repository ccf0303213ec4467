//! Event Log Port - Append-only execution log.
//!
//! Every state transition, decision, and escalation is appended as one
//! event. Writes are append-atomic: one event, one write, no partial
//! records. Multiple sessions may share a log without further locking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Timestamp;

/// Kinds of logged events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionStarted,
    TurnRecorded,
    StateTransition,
    EscalationTriggered,
    PlanGenerated,
    StepExecuted,
    SessionCompleted,
}

/// One execution log event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionEvent {
    pub timestamp: Timestamp,
    pub event_type: EventType,
    pub data: serde_json::Value,
}

impl ExecutionEvent {
    /// Creates an event stamped with the current time.
    pub fn new(event_type: EventType, data: serde_json::Value) -> Self {
        Self {
            timestamp: Timestamp::now(),
            event_type,
            data,
        }
    }
}

/// Errors raised when appending to the log.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("failed to write log entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize log entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for the append-only execution log.
pub trait EventLog: Send + Sync {
    /// Appends one event. Must write the whole event or nothing.
    fn append(&self, event: &ExecutionEvent) -> Result<(), EventLogError>;
}
