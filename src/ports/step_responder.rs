//! Step Responder Port - Interface for per-step task execution.
//!
//! The executor owns step ordering and escalation; the responder performs
//! the actual work of a step (policy lookup, account checks, refund
//! processing) and phrases the reply.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::plan::{ExchangeEntry, PlanStep};

/// Errors raised by the step execution collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepResponderError {
    #[error("step responder unavailable: {0}")]
    Unavailable(String),

    #[error("step responder timed out after {0}s")]
    Timeout(u64),

    #[error("step responder failed: {0}")]
    Failed(String),
}

/// Port for executing one procedural step against a user query.
#[async_trait]
pub trait StepResponder: Send + Sync {
    /// Performs the current step's task and phrases a reply.
    async fn respond(
        &self,
        step: &PlanStep,
        user_query: &str,
        history: &[ExchangeEntry],
    ) -> Result<String, StepResponderError>;
}
