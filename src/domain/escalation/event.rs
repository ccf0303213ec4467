//! Terminal escalation events and the persisted escalation log entry.

use serde::{Deserialize, Serialize};

use crate::domain::case::{CaseFingerprint, CaseRecord, HistoryEntry};
use crate::domain::foundation::{SessionId, Timestamp, UserId};

/// Why a session was handed to a human agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    LowConfidence,
    UserRequested,
    KeywordTrigger,
    SafetyConcern,
    LegalMatter,
    HighValueDispute,
    MaxTurnsReached,
    TranscriptionFailure,
}

impl EscalationReason {
    /// Short human-readable label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LowConfidence => "low confidence",
            Self::UserRequested => "user requested a human agent",
            Self::KeywordTrigger => "step escalation trigger matched",
            Self::SafetyConcern => "safety concern",
            Self::LegalMatter => "legal matter",
            Self::HighValueDispute => "high value dispute",
            Self::MaxTurnsReached => "maximum turns reached",
            Self::TranscriptionFailure => "transcription failure",
        }
    }
}

/// The single terminal escalation record of a session.
///
/// Produced at most once; the session is frozen before it is created, so
/// the snapshot is final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationEvent {
    pub session_id: SessionId,
    pub triggered_at_turn: u32,
    pub reason: EscalationReason,
    pub case_snapshot: CaseRecord,
}

impl EscalationEvent {
    /// Creates the escalation record for a frozen session.
    pub fn new(triggered_at_turn: u32, reason: EscalationReason, case_snapshot: CaseRecord) -> Self {
        Self {
            session_id: case_snapshot.session_id,
            triggered_at_turn,
            reason,
            case_snapshot,
        }
    }
}

/// One line of the append-only escalation log.
///
/// Field names are stable: the human hand-off tooling reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationLogEntry {
    pub timestamp: Timestamp,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub case_type: String,
    pub urgency: String,
    pub reason: EscalationReason,
    pub conversation_history: Vec<HistoryEntry>,
    pub current_step: u32,
    pub escalated_at: Timestamp,
}

impl EscalationLogEntry {
    /// Assembles the log entry from an escalation event.
    pub fn from_event(
        event: &EscalationEvent,
        user_id: UserId,
        conversation_history: Vec<HistoryEntry>,
        current_step: u32,
    ) -> Self {
        let fingerprint = CaseFingerprint::from_record(&event.case_snapshot);
        let now = Timestamp::now();
        Self {
            timestamp: now,
            session_id: event.session_id,
            user_id,
            case_type: fingerprint.case_type.label().to_string(),
            urgency: format!("{:?}", fingerprint.urgency).to_lowercase(),
            reason: event.reason,
            conversation_history,
            current_step,
            escalated_at: now,
        }
    }
}
