//! Procedural plan execution.
//!
//! Walks a generated plan one step at a time, scoring every response and
//! re-checking the escalation predicates per step. Step completion is
//! monotonic: the step index only advances, never past the end.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::case::{CaseFingerprint, CaseRecord};
use crate::domain::company::CompanyProfile;
use crate::domain::confidence::{ConfidenceAnalyzer, ScoreContext};
use crate::domain::escalation::{
    EscalationCheck, EscalationEvent, EscalationHandler, EscalationReason,
};
use crate::domain::foundation::{CaseId, SessionId, Timestamp, UserId};
use crate::ports::{PlanDraft, PlanGenerator, StepResponder};

use super::{fallback_draft, BusinessRules, PlanStep, ProceduralPlan};

/// Response given once every step of the plan has run.
const PLAN_COMPLETE_MESSAGE: &str =
    "All procedural steps have been completed. Is there anything else I can help you with?";

/// Response given when step execution itself fails.
const STEP_FAILURE_MESSAGE: &str =
    "I encountered an error processing your request. Let me connect you with a human agent.";

/// One exchange during plan execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeEntry {
    pub timestamp: Timestamp,
    pub user_query: String,
    pub agent_response: String,
    pub step_number: u32,
    pub confidence_score: f64,
}

/// Execution state for one plan, owned by the executor's caller for the
/// session's lifetime.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub case: CaseRecord,
    pub fingerprint: CaseFingerprint,
    pub plan: ProceduralPlan,
    current_step_index: usize,
    turn_history: Vec<ExchangeEntry>,
    escalation: Option<EscalationEvent>,
    pub created_at: Timestamp,
}

impl ExecutionContext {
    /// Zero-based index of the next step to execute.
    ///
    /// Never decreases and never exceeds the plan length.
    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    /// The next step to execute, if any remain.
    pub fn current_step(&self) -> Option<&PlanStep> {
        self.plan.steps.get(self.current_step_index)
    }

    /// Returns true once every step has completed.
    pub fn is_plan_complete(&self) -> bool {
        self.current_step_index >= self.plan.steps.len()
    }

    /// The exchanges so far.
    pub fn turn_history(&self) -> &[ExchangeEntry] {
        &self.turn_history
    }

    /// The escalation event, once execution has escalated.
    pub fn escalation(&self) -> Option<&EscalationEvent> {
        self.escalation.as_ref()
    }

    /// Returns true once execution has escalated.
    pub fn escalation_triggered(&self) -> bool {
        self.escalation.is_some()
    }
}

/// Result of executing one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub response: String,
    pub confidence_score: f64,
    pub step_completed: bool,
    pub escalation_required: bool,
    pub escalation_reason: Option<EscalationReason>,
}

impl StepResult {
    fn plan_complete() -> Self {
        Self {
            response: PLAN_COMPLETE_MESSAGE.to_string(),
            confidence_score: 1.0,
            step_completed: true,
            escalation_required: false,
            escalation_reason: None,
        }
    }
}

/// Drives procedural plans to completion.
pub struct PlanExecutor {
    generator: Arc<dyn PlanGenerator>,
    responder: Arc<dyn StepResponder>,
    rules: BusinessRules,
    analyzer: ConfidenceAnalyzer,
    escalation: EscalationHandler,
    profile: CompanyProfile,
    max_conversation_turns: usize,
}

impl PlanExecutor {
    /// Creates an executor.
    pub fn new(
        generator: Arc<dyn PlanGenerator>,
        responder: Arc<dyn StepResponder>,
        escalation: EscalationHandler,
        profile: CompanyProfile,
        max_conversation_turns: usize,
    ) -> Self {
        Self {
            generator,
            responder,
            rules: BusinessRules::new(),
            analyzer: ConfidenceAnalyzer::new(),
            escalation,
            profile,
            max_conversation_turns,
        }
    }

    /// Generates a plan for a finalized case and wraps it in a fresh
    /// execution context.
    ///
    /// The collaborator gets one retry; after that the fixed per-category
    /// template stands in, so plan generation never blocks the pipeline.
    pub async fn create_context(&self, case: CaseRecord, user_id: UserId) -> ExecutionContext {
        let fingerprint = CaseFingerprint::from_record(&case);
        let draft = self.generate_with_retry(&fingerprint).await;
        let plan = self.assemble_plan(&fingerprint, draft);
        info!(
            session_id = %case.session_id,
            plan_type = %plan.plan_type,
            steps = plan.len(),
            priority = ?plan.priority,
            "execution context created"
        );
        ExecutionContext {
            session_id: case.session_id,
            user_id,
            case,
            fingerprint,
            plan,
            current_step_index: 0,
            turn_history: Vec::new(),
            escalation: None,
            created_at: Timestamp::now(),
        }
    }

    /// Executes the current step against a user query.
    ///
    /// A completed plan returns the plan-complete result; otherwise the
    /// step responder performs the task, the response is scored, the
    /// escalation predicates run with the step's triggers, and the step
    /// index advances only when no escalation is required.
    pub async fn execute_step(
        &self,
        context: &mut ExecutionContext,
        user_query: &str,
    ) -> StepResult {
        let Some(step) = context.current_step().cloned() else {
            return StepResult::plan_complete();
        };

        let response = match self
            .responder
            .respond(&step, user_query, &context.turn_history)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, step = step.step_number, "step responder failed");
                context.turn_history.push(ExchangeEntry {
                    timestamp: Timestamp::now(),
                    user_query: user_query.to_string(),
                    agent_response: STEP_FAILURE_MESSAGE.to_string(),
                    step_number: step.step_number,
                    confidence_score: 0.0,
                });
                return StepResult {
                    response: STEP_FAILURE_MESSAGE.to_string(),
                    confidence_score: 0.0,
                    step_completed: false,
                    escalation_required: true,
                    escalation_reason: Some(EscalationReason::LowConfidence),
                };
            }
        };

        let confidence_score = self
            .analyzer
            .score(&response, &ScoreContext { user_query });

        let escalation_reason = self.escalation.evaluate(&EscalationCheck {
            user_text: user_query,
            confidence_score,
            step_triggers: &step.escalation_triggers,
            exchange_count: context.turn_history.len(),
            max_exchanges: None,
        });

        context.turn_history.push(ExchangeEntry {
            timestamp: Timestamp::now(),
            user_query: user_query.to_string(),
            agent_response: response.clone(),
            step_number: step.step_number,
            confidence_score,
        });

        let step_completed = escalation_reason.is_none();
        if step_completed {
            // Monotonic: the index only ever advances, and `current_step`
            // was Some, so this never passes the plan length.
            context.current_step_index += 1;
        }

        StepResult {
            response,
            confidence_score,
            step_completed,
            escalation_required: escalation_reason.is_some(),
            escalation_reason,
        }
    }

    /// Handles one conversational exchange during plan execution.
    ///
    /// Returns the reply and whether the conversation should continue.
    /// The hard exchange cap forces escalation regardless of confidence;
    /// any escalation freezes the context and returns the profile's
    /// hand-off message.
    pub async fn handle_conversation(
        &self,
        context: &mut ExecutionContext,
        user_query: &str,
    ) -> (String, bool) {
        if context.escalation_triggered() {
            return (self.profile.handoff_message.clone(), false);
        }

        if context.turn_history.len() >= self.max_conversation_turns {
            self.escalate(context, EscalationReason::MaxTurnsReached);
            return (self.profile.handoff_message.clone(), false);
        }

        let result = self.execute_step(context, user_query).await;
        if result.escalation_required {
            let reason = result
                .escalation_reason
                .unwrap_or(EscalationReason::LowConfidence);
            self.escalate(context, reason);
            return (self.profile.handoff_message.clone(), false);
        }

        (result.response, true)
    }

    fn escalate(&self, context: &mut ExecutionContext, reason: EscalationReason) {
        info!(
            session_id = %context.session_id,
            reason = reason.label(),
            step = context.current_step_index,
            "plan execution escalated"
        );
        let event = EscalationEvent::new(
            context.turn_history.len() as u32,
            reason,
            context.case.clone(),
        );
        context.escalation = Some(event);
    }

    async fn generate_with_retry(&self, fingerprint: &CaseFingerprint) -> PlanDraft {
        for attempt in 0..2 {
            match self.generator.generate(fingerprint).await {
                Ok(draft) if !draft.steps.is_empty() => return draft,
                Ok(_) => {
                    warn!(attempt, "plan generator returned an empty step list");
                }
                Err(err) => {
                    warn!(attempt, error = %err, "plan generator failed");
                }
            }
        }
        fallback_draft(fingerprint.case_type)
    }

    fn assemble_plan(&self, fingerprint: &CaseFingerprint, draft: PlanDraft) -> ProceduralPlan {
        let priority = self.rules.determine_priority(fingerprint);
        let estimated_resolution_time =
            self.rules.estimate_resolution_time(fingerprint, priority);
        let escalation_required = self.rules.requires_escalation(fingerprint);

        let steps = draft
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, mut step)| {
                step.step_number = i as u32 + 1;
                step
            })
            .collect();

        ProceduralPlan {
            case_id: CaseId::new(),
            plan_type: draft.plan_type,
            priority,
            estimated_resolution_time,
            escalation_required,
            special_notes: draft.special_notes,
            steps,
        }
    }
}
