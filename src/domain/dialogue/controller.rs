//! The dialogue controller.
//!
//! Orchestrates turns: acquires extraction for each utterance, merges it
//! into the case record, scores confidence, and decides per turn whether
//! to continue, escalate, or finish. Expected control flow is returned as
//! values, never raised as errors.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::DialogueConfig;
use crate::domain::case::{
    CaseRecord, CaseRecordError, ConversationRecord, HistoryEntry, Turn,
};
use crate::domain::company::CompanyProfile;
use crate::domain::confidence::{ConfidenceAnalyzer, ScoreContext};
use crate::domain::escalation::{
    EscalationCheck, EscalationEvent, EscalationHandler, EscalationReason,
};
use crate::domain::extraction::{ExtractionRequest, TurnExtractor};
use crate::domain::foundation::{SessionId, StateMachine, ValidationError};
use crate::ports::{TextUnderstanding, Utterance};

use super::{DialogueState, Slot};

/// Errors raised when driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session already reached a terminal state")]
    Frozen,

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),

    #[error(transparent)]
    Record(#[from] CaseRecordError),
}

/// The per-turn decision.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Ask the next question and wait for another utterance.
    Continue { next_question: String },
    /// The interview finished normally; the case is frozen.
    Completed { closing_message: String },
    /// The session escalated; the case is frozen and handed off.
    Escalated {
        event: EscalationEvent,
        handoff_message: String,
    },
}

/// All mutable state of one interview session.
///
/// Owned by the caller and passed through each transition; the controller
/// itself holds no session state, so independent sessions never contend.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    state: DialogueState,
    record: CaseRecord,
    turns: Vec<Turn>,
    history: Vec<HistoryEntry>,
    current_question: String,
    current_slot: Slot,
    completed_turns: u32,
    escalation: Option<EscalationEvent>,
}

impl DialogueSession {
    /// Current lifecycle state.
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// The accumulated case record.
    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    /// The append-only turn history.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The full transcript, agent and customer lines interleaved.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The question currently awaiting an answer.
    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    /// Number of completed question/response exchanges.
    pub fn completed_turns(&self) -> u32 {
        self.completed_turns
    }

    /// The escalation event, once the session has escalated.
    pub fn escalation(&self) -> Option<&EscalationEvent> {
        self.escalation.as_ref()
    }

    /// Builds the persisted conversation-record artifact.
    pub fn conversation_record(&self) -> ConversationRecord {
        ConversationRecord::new(&self.record, self.history.clone(), self.completed_turns)
    }
}

/// Orchestrates bounded interviews.
///
/// One controller drives any number of independent sessions; which slot to
/// target next is decided locally so the interview always terminates.
pub struct DialogueController {
    config: DialogueConfig,
    profile: CompanyProfile,
    extractor: TurnExtractor,
    analyzer: ConfidenceAnalyzer,
    escalation: EscalationHandler,
    understanding: Arc<dyn TextUnderstanding>,
}

impl DialogueController {
    /// Creates a controller.
    pub fn new(
        config: DialogueConfig,
        profile: CompanyProfile,
        escalation: EscalationHandler,
        understanding: Arc<dyn TextUnderstanding>,
    ) -> Self {
        Self {
            config,
            profile,
            extractor: TurnExtractor::new(),
            analyzer: ConfidenceAnalyzer::new(),
            escalation,
            understanding,
        }
    }

    /// The profile this controller speaks for.
    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    /// Allocates a session and emits the opening question.
    pub fn begin(&self) -> DialogueSession {
        let session_id = SessionId::new();
        info!(%session_id, "interview session started");
        DialogueSession {
            state: DialogueState::AwaitingUtterance,
            record: CaseRecord::new(session_id),
            turns: Vec::new(),
            history: vec![HistoryEntry::agent(self.profile.greeting.clone())],
            current_question: self.profile.greeting.clone(),
            current_slot: Slot::Identity,
            completed_turns: 0,
            escalation: None,
        }
    }

    /// Processes one utterance and decides what happens next.
    ///
    /// Extraction failures never abort the turn: the pattern fallback or
    /// the failed-update sentinel keep the turn recorded, and an empty
    /// utterance scores zero confidence, which trips the low-confidence
    /// escalation naturally.
    pub async fn observe_utterance(
        &self,
        session: &mut DialogueSession,
        utterance: &Utterance,
    ) -> Result<TurnOutcome, SessionError> {
        if session.state.is_terminal() {
            return Err(SessionError::Frozen);
        }
        session.state = session.state.transition_to(DialogueState::Extracting)?;

        session
            .history
            .push(HistoryEntry::customer(utterance.text.clone()));

        let update = self
            .extractor
            .extract(
                self.understanding.as_ref(),
                &ExtractionRequest {
                    raw_text: &utterance.text,
                    record: &session.record,
                    question: &session.current_question,
                    targeted_slot: session.current_slot,
                },
            )
            .await;

        let confidence_score = if utterance.is_empty() {
            0.0
        } else {
            self.analyzer.score(
                &utterance.text,
                &ScoreContext {
                    user_query: &session.current_question,
                },
            )
        };

        session.completed_turns += 1;
        let turn_index = session.completed_turns;
        session.record.apply(&update, turn_index)?;
        session.turns.push(Turn::new(
            turn_index,
            session.current_question.clone(),
            utterance.text.clone(),
            utterance.transcription_confidence,
            update,
            confidence_score,
        ));

        session.state = session.state.transition_to(DialogueState::Deciding)?;
        self.decide(session, &utterance.text, confidence_score).await
    }

    /// Terminates a session that failed outside the turn loop (capture and
    /// text fallback both failed).
    pub fn fail_session(
        &self,
        session: &mut DialogueSession,
        reason: EscalationReason,
    ) -> Result<TurnOutcome, SessionError> {
        if session.state.is_terminal() {
            return Err(SessionError::Frozen);
        }
        warn!(?reason, "terminating session on unrecoverable failure");
        Ok(self.escalate(session, reason))
    }

    async fn decide(
        &self,
        session: &mut DialogueSession,
        user_text: &str,
        confidence_score: f64,
    ) -> Result<TurnOutcome, SessionError> {
        // Escalation predicates run before the question budget: an explicit
        // request for a human on the last turn still escalates.
        if let Some(reason) = self
            .escalation
            .evaluate(&EscalationCheck::for_turn(user_text, confidence_score))
        {
            return Ok(self.escalate(session, reason));
        }

        if session.completed_turns >= self.config.max_questions {
            session.state = session.state.transition_to(DialogueState::Completed)?;
            session.record.freeze();
            let closing_message = self.profile.completion_message.clone();
            session.history.push(HistoryEntry::agent(closing_message.clone()));
            info!(
                session_id = %session.record.session_id,
                turns = session.completed_turns,
                "interview completed"
            );
            return Ok(TurnOutcome::Completed { closing_message });
        }

        let slot = Slot::next_missing(&session.record).unwrap_or(Slot::ProblemDescription);
        let next_question = self.word_question(session, slot).await;
        session.current_slot = slot;
        session.current_question = next_question.clone();
        session.history.push(HistoryEntry::agent(next_question.clone()));
        session.state = session.state.transition_to(DialogueState::AwaitingUtterance)?;
        Ok(TurnOutcome::Continue { next_question })
    }

    fn escalate(&self, session: &mut DialogueSession, reason: EscalationReason) -> TurnOutcome {
        session.record.freeze();
        // Valid from every state a live session can be in.
        session.state = DialogueState::Escalated;
        let event = EscalationEvent::new(session.completed_turns, reason, session.record.clone());
        session.escalation = Some(event.clone());
        let handoff_message = self.profile.handoff_message.clone();
        session.history.push(HistoryEntry::agent(handoff_message.clone()));
        info!(
            session_id = %session.record.session_id,
            reason = reason.label(),
            turn = session.completed_turns,
            "session escalated"
        );
        TurnOutcome::Escalated {
            event,
            handoff_message,
        }
    }

    /// Words the next question, preferring the collaborator and falling
    /// back to the profile's canned phrasing.
    async fn word_question(&self, session: &DialogueSession, slot: Slot) -> String {
        let prompt = self.build_question_prompt(session, slot);
        match self.understanding.generate_question(&prompt).await {
            Ok(question) if !question.trim().is_empty() => question.trim().to_string(),
            Ok(_) => self.profile.question_for(slot).to_string(),
            Err(err) => {
                warn!(error = %err, "question collaborator failed, using canned wording");
                self.profile.question_for(slot).to_string()
            }
        }
    }

    fn build_question_prompt(&self, session: &DialogueSession, slot: Slot) -> String {
        let transcript: String = session
            .history
            .iter()
            .map(|entry| {
                let speaker = match entry.role {
                    crate::domain::case::SpeakerRole::Agent => "Agent",
                    crate::domain::case::SpeakerRole::Customer => "Customer",
                };
                format!("{speaker}: {}\n", entry.message)
            })
            .collect();

        let missing = match slot {
            Slot::Identity => "customer name and company",
            Slot::ProblemDescription => "problem description",
            Slot::OrderDetails => "order or product details",
            Slot::ContactInfo => "contact information",
        };

        format!(
            "You are an experienced, empathetic customer service agent for {company}.\n\
             Your goal is to gather the essential complaint information in at most \
             {max} questions.\n\
             \n\
             CONVERSATION SO FAR:\n{transcript}\n\
             QUESTION COUNT: {asked}/{max}\n\
             MOST IMPORTANT MISSING INFORMATION: {missing}\n\
             \n\
             Generate the next question to ask the customer. Keep it natural, \
             professional, and under 25 words. Respond with ONLY the question.",
            company = self.profile.display_name,
            max = self.config.max_questions,
            asked = session.completed_turns,
            missing = missing,
        )
    }
}
