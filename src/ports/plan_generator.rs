//! Plan Generator Port - Interface for the planning collaborator.
//!
//! The collaborator authors the step list; priority classification and
//! escalation flags stay with the local business rules. Generation
//! failures fall back to fixed step templates and never block a case.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::case::CaseFingerprint;
use crate::domain::plan::PlanStep;

/// The collaborator-authored portion of a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub plan_type: String,
    pub steps: Vec<PlanStep>,
    pub special_notes: Vec<String>,
}

/// Errors raised by the planning collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanGenerationError {
    #[error("plan generator unavailable: {0}")]
    Unavailable(String),

    #[error("plan generator timed out after {0}s")]
    Timeout(u64),

    #[error("plan generator returned an unusable plan: {0}")]
    Malformed(String),
}

/// Port for procedural plan generation.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generates a plan draft for a finalized case.
    async fn generate(&self, fingerprint: &CaseFingerprint)
        -> Result<PlanDraft, PlanGenerationError>;
}
