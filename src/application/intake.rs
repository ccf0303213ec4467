//! Intake session orchestration.
//!
//! Wires an utterance source, the dialogue controller, optional speech
//! output, the execution log, and the artifact archive into one bounded
//! interview run. Speech playback is fire-and-forget: it is spawned,
//! never joined, and never touches session state.

use std::sync::Arc;

use tracing::warn;

use crate::domain::case::ConversationRecord;
use crate::domain::dialogue::{
    DialogueController, DialogueSession, SessionError, TurnOutcome,
};
use crate::domain::escalation::{EscalationLogEntry, EscalationReason};
use crate::domain::foundation::UserId;
use crate::ports::{
    CaptureError, EventLog, EventType, ExecutionEvent, SessionArchive, SpeechSynthesizer,
    Utterance, UtteranceSource,
};

/// The result of one completed intake run.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    /// The terminal session: record, turns, transcript, escalation.
    pub session: DialogueSession,
    /// The last message shown or spoken to the customer.
    pub final_message: String,
}

impl IntakeOutcome {
    /// The persisted conversation-record artifact for this run.
    pub fn conversation_record(&self) -> ConversationRecord {
        self.session.conversation_record()
    }
}

/// Runs complete intake interviews.
pub struct IntakeService {
    controller: DialogueController,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    event_log: Arc<dyn EventLog>,
    archive: Arc<dyn SessionArchive>,
    user_id: UserId,
}

impl IntakeService {
    /// Creates the service. Speech output is optional; absence means
    /// text-only display.
    pub fn new(
        controller: DialogueController,
        event_log: Arc<dyn EventLog>,
        archive: Arc<dyn SessionArchive>,
        user_id: UserId,
    ) -> Self {
        Self {
            controller,
            synthesizer: None,
            event_log,
            archive,
            user_id,
        }
    }

    /// Attaches a speech synthesizer.
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Runs one interview to its terminal state.
    ///
    /// Capture failures degrade per the error policy: the failover source
    /// already retried via text, so a remaining failure becomes an empty
    /// turn (confidence zero); a cancelled or exhausted input ends the
    /// session as a transcription failure. The customer never sees a raw
    /// error.
    pub async fn run(
        &self,
        input: &mut dyn UtteranceSource,
    ) -> Result<IntakeOutcome, SessionError> {
        let mut session = self.controller.begin();
        self.log(
            EventType::SessionStarted,
            serde_json::json!({
                "session_id": session.record().session_id.to_string(),
                "profile": self.controller.profile().key,
            }),
        );
        self.speak(session.current_question());

        let final_message = loop {
            let utterance = match input.next_utterance(session.current_question()).await {
                Ok(utterance) => utterance,
                Err(CaptureError::Cancelled) | Err(CaptureError::Exhausted) => {
                    let outcome = self
                        .controller
                        .fail_session(&mut session, EscalationReason::TranscriptionFailure)?;
                    break self.finish(&mut session, outcome);
                }
                Err(err) => {
                    warn!(error = %err, "utterance acquisition failed after fallback");
                    // Both input paths failed: record the turn as empty so
                    // low confidence escalates the session normally.
                    Utterance::voice("", 0.0)
                }
            };

            let outcome = self.controller.observe_utterance(&mut session, &utterance).await?;
            self.log(
                EventType::TurnRecorded,
                serde_json::json!({
                    "session_id": session.record().session_id.to_string(),
                    "turn_index": session.completed_turns(),
                    "confidence": session.turns().last().map(|t| t.confidence_score),
                }),
            );
            self.log(
                EventType::StateTransition,
                serde_json::json!({
                    "session_id": session.record().session_id.to_string(),
                    "state": session.state(),
                }),
            );

            match outcome {
                TurnOutcome::Continue { ref next_question } => {
                    self.speak(next_question);
                }
                terminal => break self.finish(&mut session, terminal),
            }
        };

        Ok(IntakeOutcome {
            session,
            final_message,
        })
    }

    /// Handles a terminal outcome: speech, logging, artifacts.
    fn finish(&self, session: &DialogueSession, outcome: TurnOutcome) -> String {
        let final_message = match outcome {
            TurnOutcome::Completed { closing_message } => {
                self.log(
                    EventType::SessionCompleted,
                    serde_json::json!({
                        "session_id": session.record().session_id.to_string(),
                        "total_questions": session.completed_turns(),
                    }),
                );
                closing_message
            }
            TurnOutcome::Escalated {
                event,
                handoff_message,
            } => {
                self.log(
                    EventType::EscalationTriggered,
                    serde_json::json!({
                        "session_id": event.session_id.to_string(),
                        "reason": event.reason,
                        "turn": event.triggered_at_turn,
                    }),
                );
                let entry = EscalationLogEntry::from_event(
                    &event,
                    self.user_id.clone(),
                    session.history().to_vec(),
                    0,
                );
                if let Err(err) = self.archive.append_escalation(&entry) {
                    warn!(error = %err, "failed to append escalation log entry");
                }
                handoff_message
            }
            TurnOutcome::Continue { next_question } => next_question,
        };

        if let Err(err) = self.archive.store_conversation(&session.conversation_record()) {
            warn!(error = %err, "failed to store conversation record");
        }
        self.speak(&final_message);
        final_message
    }

    /// Fire-and-forget speech output.
    fn speak(&self, text: &str) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };
        let synthesizer = synthesizer.clone();
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(err) = synthesizer.speak(&text).await {
                warn!(error = %err, "speech output failed, continuing text-only");
            }
        });
    }

    fn log(&self, event_type: EventType, data: serde_json::Value) {
        if let Err(err) = self.event_log.append(&ExecutionEvent::new(event_type, data)) {
            warn!(error = %err, "failed to append execution event");
        }
    }
}
