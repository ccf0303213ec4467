//! Dialogue state machine.
//!
//! Lifecycle states of one bounded interview. `Escalated` and `Completed`
//! are terminal; the controller can never wedge in a non-terminal state
//! because every failure path has a terminal transition.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of an interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Session allocated, opening question not yet asked.
    #[default]
    Init,

    /// A question is out; waiting for the user's utterance.
    AwaitingUtterance,

    /// Utterance received; extraction and merge in progress.
    Extracting,

    /// Turn recorded; deciding whether to continue, escalate, or finish.
    Deciding,

    /// Handed to a human agent. Terminal.
    Escalated,

    /// Interview finished normally. Terminal.
    Completed,
}

impl DialogueState {
    /// Returns true if the session can accept another utterance.
    pub fn accepts_utterance(&self) -> bool {
        matches!(self, Self::AwaitingUtterance)
    }

    /// Returns true if the session reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Escalated | Self::Completed)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            // Opening question starts the first turn
            (Init, AwaitingUtterance) |
            // Utterance arrives
            (AwaitingUtterance, Extracting) |
            // Turn recorded
            (Extracting, Deciding) |
            // Next question goes out
            (Deciding, AwaitingUtterance) |
            // Escalation predicates tripped
            (Deciding, Escalated) |
            // Question budget exhausted
            (Deciding, Completed) |
            // Unrecoverable failure while waiting or extracting
            (AwaitingUtterance, Escalated) |
            (Extracting, Escalated)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Init => vec![AwaitingUtterance],
            AwaitingUtterance => vec![Extracting, Escalated],
            Extracting => vec![Deciding, Escalated],
            Deciding => vec![AwaitingUtterance, Escalated, Completed],
            Escalated => vec![],
            Completed => vec![],
        }
    }
}
