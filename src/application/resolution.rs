//! Resolution orchestration.
//!
//! Drives a finalized case through plan generation and the step-by-step
//! conversation, recording every step and escalation.

use std::sync::Arc;

use tracing::warn;

use crate::domain::case::{CaseRecord, HistoryEntry};
use crate::domain::escalation::EscalationLogEntry;
use crate::domain::foundation::UserId;
use crate::domain::plan::{ExecutionContext, PlanExecutor};
use crate::ports::{EventLog, EventType, ExecutionEvent, SessionArchive};

/// Runs procedural plans for finalized cases.
pub struct ResolutionService {
    executor: PlanExecutor,
    event_log: Arc<dyn EventLog>,
    archive: Arc<dyn SessionArchive>,
}

impl ResolutionService {
    /// Creates the service.
    pub fn new(
        executor: PlanExecutor,
        event_log: Arc<dyn EventLog>,
        archive: Arc<dyn SessionArchive>,
    ) -> Self {
        Self {
            executor,
            event_log,
            archive,
        }
    }

    /// Generates the plan for a finalized case and opens its execution
    /// context.
    pub async fn start(&self, case: CaseRecord, user_id: UserId) -> ExecutionContext {
        let context = self.executor.create_context(case, user_id).await;
        self.log(
            EventType::PlanGenerated,
            serde_json::json!({
                "session_id": context.session_id.to_string(),
                "plan_type": context.plan.plan_type,
                "steps": context.plan.len(),
                "priority": context.plan.priority,
                "escalation_required": context.plan.escalation_required,
            }),
        );
        context
    }

    /// Handles one conversational exchange against the plan.
    ///
    /// Returns the reply and whether the conversation should continue;
    /// escalations are logged and appended to the escalation log before
    /// the hand-off message is returned.
    pub async fn converse(
        &self,
        context: &mut ExecutionContext,
        user_query: &str,
    ) -> (String, bool) {
        let escalated_before = context.escalation_triggered();
        let (response, should_continue) =
            self.executor.handle_conversation(context, user_query).await;

        self.log(
            EventType::StepExecuted,
            serde_json::json!({
                "session_id": context.session_id.to_string(),
                "step_index": context.current_step_index(),
                "exchanges": context.turn_history().len(),
                "should_continue": should_continue,
            }),
        );

        if !escalated_before {
            if let Some(event) = context.escalation() {
                self.log(
                    EventType::EscalationTriggered,
                    serde_json::json!({
                        "session_id": event.session_id.to_string(),
                        "reason": event.reason,
                        "step_index": context.current_step_index(),
                    }),
                );
                let entry = EscalationLogEntry::from_event(
                    event,
                    context.user_id.clone(),
                    exchange_transcript(context),
                    context.current_step_index() as u32,
                );
                if let Err(err) = self.archive.append_escalation(&entry) {
                    warn!(error = %err, "failed to append escalation log entry");
                }
            }
        }

        if !should_continue || context.is_plan_complete() {
            self.log(
                EventType::SessionCompleted,
                serde_json::json!({
                    "session_id": context.session_id.to_string(),
                    "completed_steps": context.current_step_index(),
                    "escalated": context.escalation_triggered(),
                }),
            );
        }

        (response, should_continue)
    }

    fn log(&self, event_type: EventType, data: serde_json::Value) {
        if let Err(err) = self.event_log.append(&ExecutionEvent::new(event_type, data)) {
            warn!(error = %err, "failed to append execution event");
        }
    }
}

/// Flattens plan-execution exchanges into transcript lines.
fn exchange_transcript(context: &ExecutionContext) -> Vec<HistoryEntry> {
    context
        .turn_history()
        .iter()
        .flat_map(|exchange| {
            [
                HistoryEntry::customer(exchange.user_query.clone()),
                HistoryEntry::agent(exchange.agent_response.clone()),
            ]
        })
        .collect()
}
