//! Procedural plan data model.
//!
//! Field names are stable: downstream resolution tooling parses plan
//! JSON as-is. A plan is generated once per finalized case and is
//! immutable afterwards; only the execution context's step index moves.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CaseId;

/// Priority assigned to a plan by the business rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PlanPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// One step of a procedural plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub step_number: u32,
    pub action: String,
    pub description: String,
    pub responsible_team: String,
    pub estimated_time: String,
    pub conditions: Vec<String>,
    pub escalation_triggers: Vec<String>,
}

impl PlanStep {
    /// Creates a step with the default team and timing.
    pub fn new(
        step_number: u32,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            step_number,
            action: action.into(),
            description: description.into(),
            responsible_team: "Customer Service".to_string(),
            estimated_time: "5-10 minutes".to_string(),
            conditions: Vec::new(),
            escalation_triggers: Vec::new(),
        }
    }

    /// Sets the responsible team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.responsible_team = team.into();
        self
    }

    /// Sets the estimated time.
    pub fn with_estimated_time(mut self, time: impl Into<String>) -> Self {
        self.estimated_time = time.into();
        self
    }

    /// Sets the step's escalation triggers.
    pub fn with_escalation_triggers(mut self, triggers: Vec<String>) -> Self {
        self.escalation_triggers = triggers;
        self
    }
}

/// A complete procedural plan for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralPlan {
    pub case_id: CaseId,
    pub plan_type: String,
    pub priority: PlanPriority,
    pub estimated_resolution_time: String,
    pub escalation_required: bool,
    pub special_notes: Vec<String>,
    pub steps: Vec<PlanStep>,
}

impl ProceduralPlan {
    /// Number of steps in the plan.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
