//! Dialogue domain module.
//!
//! The bounded interview: lifecycle state machine, deterministic
//! missing-slot targeting, and the turn-by-turn controller.

mod controller;
mod slots;
mod state;

pub use controller::{DialogueController, DialogueSession, SessionError, TurnOutcome};
pub use slots::Slot;
pub use state::DialogueState;
