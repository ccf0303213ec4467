//! End-to-end intake interview scenarios.

use std::sync::Arc;

use caseflow::adapters::{
    FailoverUtteranceSource, FileSessionArchive, JsonlEventLog, MockUnderstanding,
    NullEventLog, QueuedTextSource, ScriptedAudioSource, TimeoutUnderstanding,
    VoiceUtteranceSource,
};
use caseflow::application::IntakeService;
use caseflow::config::{AudioConfig, DialogueConfig, EscalationConfig};
use caseflow::domain::company::CompanyProfile;
use caseflow::domain::dialogue::{DialogueController, DialogueState};
use caseflow::domain::escalation::{EscalationHandler, EscalationReason};
use caseflow::domain::foundation::UserId;
use caseflow::ports::{SpeechRecognizer, Transcription, TranscriptionError};
use async_trait::async_trait;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn controller(understanding: MockUnderstanding) -> DialogueController {
    DialogueController::new(
        DialogueConfig::default(),
        CompanyProfile::generic(),
        EscalationHandler::new(&EscalationConfig::default()),
        Arc::new(understanding),
    )
}

fn service(
    understanding: MockUnderstanding,
    archive: Arc<FileSessionArchive>,
    log_path: &std::path::Path,
) -> IntakeService {
    IntakeService::new(
        controller(understanding),
        Arc::new(JsonlEventLog::open(log_path).unwrap()),
        archive,
        UserId::new("customer-042"),
    )
}

/// The canonical three-turn scenario: a parsed first turn, an unparsable
/// second turn recovered by the regex fallback, and an explicit request
/// for a human on the third.
#[tokio::test]
async fn three_turn_session_escalates_on_manager_request() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let archive = Arc::new(FileSessionArchive::new(dir.path().join("sessions")).unwrap());

    let understanding = MockUnderstanding::new()
        // Turn 1 parses cleanly and fills everything but contact info.
        .with_extraction(
            r#"{"customer_name": "John", "company_name": "Amazon", "company_confidence": 0.9,
                "problem_description": "my order arrived broken",
                "order_id": "112-7766554-1234567"}"#,
        )
        // Turn 2 is unparsable; the contact-slot regex fallback applies.
        .with_extraction("I could not produce any structured output for this response.")
        // Turn 3 never reaches extraction mapping trouble; give it valid JSON.
        .with_extraction(r#"{}"#)
        .with_question("Could you share a phone number or email so we can follow up?")
        .with_question("Is there anything else you'd like to add?");

    let service = service(understanding, archive.clone(), &dir.path().join("log.jsonl"));
    let mut input = QueuedTextSource::new([
        "Hi, I'm John, my Amazon order arrived broken and I want this fixed quickly please",
        "sure, you can reach me on 555-0123 whenever it suits you best today",
        "honestly at this point I just want to speak to a manager about all of this",
    ]);

    let outcome = service.run(&mut input).await.unwrap();
    let session = &outcome.session;

    assert_eq!(session.state(), DialogueState::Escalated);
    let event = session.escalation().unwrap();
    assert_eq!(event.reason, EscalationReason::UserRequested);
    assert_eq!(event.triggered_at_turn, 3);

    let record = session.record();
    assert_eq!(record.customer_name.as_deref(), Some("John"));
    assert_eq!(record.company_name.as_deref(), Some("Amazon"));
    assert_eq!(record.customer_phone.as_deref(), Some("555-0123"));
    assert!(record.is_frozen());

    // The escalation log received exactly one stable-format entry.
    let escalations =
        std::fs::read_to_string(archive.escalation_log_path()).unwrap();
    assert_eq!(escalations.lines().count(), 1);
    let entry: serde_json::Value = serde_json::from_str(escalations.lines().next().unwrap()).unwrap();
    assert_eq!(entry["reason"], "user_requested");
    assert_eq!(entry["user_id"], "customer-042");
}

#[tokio::test]
async fn full_question_budget_completes_normally() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let archive = Arc::new(FileSessionArchive::new(dir.path().join("sessions")).unwrap());

    let understanding = MockUnderstanding::new()
        .with_extraction(r#"{"customer_name": "Priya"}"#)
        .with_extraction(r#"{"problem_description": "the washing machine leaks water"}"#)
        .with_extraction(r#"{"customer_phone": "555-0144"}"#)
        .with_question("What seems to be the problem?")
        .with_question("How can we reach you?");

    // Production wiring puts the collaborator behind a per-call deadline.
    let controller = DialogueController::new(
        DialogueConfig::default(),
        CompanyProfile::generic(),
        EscalationHandler::new(&EscalationConfig::default()),
        Arc::new(TimeoutUnderstanding::new(
            Arc::new(understanding),
            std::time::Duration::from_secs(20),
        )),
    );
    let service = IntakeService::new(
        controller,
        Arc::new(JsonlEventLog::open(dir.path().join("log.jsonl")).unwrap()),
        archive.clone(),
        UserId::new("customer-042"),
    );
    let mut input = QueuedTextSource::new([
        "Hello, my name is Priya and I need some help with a recent purchase of mine",
        "the washing machine I bought last month leaks water all over the kitchen floor",
        "you can call me on 555-0144 any weekday morning before noon if that works",
    ]);

    let outcome = service.run(&mut input).await.unwrap();
    assert_eq!(outcome.session.state(), DialogueState::Completed);
    assert_eq!(outcome.session.completed_turns(), 3);
    assert_eq!(
        outcome.final_message,
        CompanyProfile::generic().completion_message
    );

    // The conversation artifact was stored and round-trips.
    let artifact = outcome.conversation_record();
    let stored =
        std::fs::read_to_string(archive.conversation_path(&artifact)).unwrap();
    let parsed: caseflow::domain::case::ConversationRecord =
        serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed.extracted_data.customer_name.as_deref(), Some("Priya"));
    assert_eq!(parsed.total_questions, 3);
    assert_eq!(parsed.to_case_record().customer_phone.as_deref(), Some("555-0144"));
}

#[tokio::test]
async fn exhausted_input_ends_as_transcription_failure() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let archive = Arc::new(FileSessionArchive::new(dir.path().join("sessions")).unwrap());

    let understanding = MockUnderstanding::new()
        .with_extraction(r#"{"customer_name": "John"}"#)
        .with_question("What went wrong?");

    let service = IntakeService::new(
        controller(understanding),
        Arc::new(NullEventLog),
        archive,
        UserId::anonymous(),
    );
    // Only one answer for a three-question interview.
    let mut input = QueuedTextSource::new([
        "I'm John and my delivery has gone missing somewhere along the way this week",
    ]);

    let outcome = service.run(&mut input).await.unwrap();
    assert_eq!(outcome.session.state(), DialogueState::Escalated);
    assert_eq!(
        outcome.session.escalation().unwrap().reason,
        EscalationReason::TranscriptionFailure
    );
    // The completed first turn survived into the frozen record.
    assert_eq!(
        outcome.session.record().customer_name.as_deref(),
        Some("John")
    );
}

/// Voice path: scripted audio is endpointed, transcribed, and when the
/// microphone dies the failover source degrades to typed text.
mod voice_path {
    use super::*;

    struct ScriptedRecognizer {
        texts: std::sync::Mutex<std::collections::VecDeque<String>>,
    }

    impl ScriptedRecognizer {
        fn new(texts: Vec<&str>) -> Self {
            Self {
                texts: std::sync::Mutex::new(texts.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl SpeechRecognizer for ScriptedRecognizer {
        async fn transcribe(
            &self,
            _samples: &[i16],
            _sample_rate: u32,
        ) -> Result<Transcription, TranscriptionError> {
            match self.texts.lock().unwrap().pop_front() {
                Some(text) => Ok(Transcription::new(text, 0.9)),
                None => Ok(Transcription::no_speech()),
            }
        }
    }

    #[tokio::test]
    async fn spoken_answers_flow_through_endpointing_and_transcription() {
        let dir = tempfile::tempdir().unwrap();
        let archive = Arc::new(FileSessionArchive::new(dir.path().join("sessions")).unwrap());

        let understanding = MockUnderstanding::new()
            .with_extraction(r#"{"customer_name": "John"}"#)
            .with_extraction(r#"{"problem_description": "parcel missing"}"#)
            .with_extraction(r#"{"customer_phone": "555-0123"}"#)
            .with_question("What went wrong?")
            .with_question("How do we reach you?");

        let service = IntakeService::new(
            controller(understanding),
            Arc::new(JsonlEventLog::open(dir.path().join("log.jsonl")).unwrap()),
            archive,
            UserId::anonymous(),
        );

        // Three utterances: 12 speech chunks then trailing silence each.
        let chunks: Vec<_> = (0..3)
            .flat_map(|_| {
                let mut burst = vec![caseflow::domain::audio::AudioChunk::new(vec![2_000; 16]); 12];
                burst.extend(
                    std::iter::repeat(caseflow::domain::audio::AudioChunk::silent(16)).take(25),
                );
                burst
            })
            .collect();
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![
            "hello there I'm John and I have a complaint about a missing parcel delivery",
            "the parcel with my order went missing somewhere between the depot and my home",
            "you can call me back on 555-0123 whenever works for your support team today",
        ]));
        let voice = VoiceUtteranceSource::new(
            ScriptedAudioSource::new(chunks),
            recognizer,
            AudioConfig::default(),
        );
        let mut input = FailoverUtteranceSource::new(
            voice,
            QueuedTextSource::new(Vec::<String>::new()),
        );

        let outcome = service.run(&mut input).await.unwrap();
        assert_eq!(outcome.session.state(), DialogueState::Completed);
        assert_eq!(outcome.session.record().customer_name.as_deref(), Some("John"));
        assert_eq!(
            outcome.session.record().customer_phone.as_deref(),
            Some("555-0123")
        );
        // Every turn came in on the voice path with the recognizer's score.
        assert!(outcome
            .session
            .turns()
            .iter()
            .all(|t| t.transcription_confidence == 0.9));
    }

    #[tokio::test]
    async fn dead_microphone_degrades_to_typed_answers() {
        let dir = tempfile::tempdir().unwrap();
        let archive = Arc::new(FileSessionArchive::new(dir.path().join("sessions")).unwrap());

        let understanding = MockUnderstanding::new()
            .with_extraction(r#"{"customer_name": "John"}"#)
            .with_extraction(r#"{"problem_description": "billing problem"}"#)
            .with_extraction(r#"{"customer_email": "john@example.com"}"#)
            .with_question("What went wrong?")
            .with_question("How do we reach you?");

        let service = IntakeService::new(
            controller(understanding),
            Arc::new(JsonlEventLog::open(dir.path().join("log.jsonl")).unwrap()),
            archive,
            UserId::anonymous(),
        );

        // The audio stream produces nothing at all.
        let voice = VoiceUtteranceSource::new(
            ScriptedAudioSource::new(vec![]),
            Arc::new(ScriptedRecognizer::new(vec![])),
            AudioConfig::default(),
        );
        let mut input = FailoverUtteranceSource::new(
            voice,
            QueuedTextSource::new([
                "I'm John and I believe I have been charged twice for the same order",
                "both charges show on my card statement from last Tuesday evening somehow",
                "email me at john@example.com with whatever you find out about those charges",
            ]),
        );

        let outcome = service.run(&mut input).await.unwrap();
        assert_eq!(outcome.session.state(), DialogueState::Completed);
        assert_eq!(
            outcome.session.record().customer_email.as_deref(),
            Some("john@example.com")
        );
        // Typed fallback answers carry full transcription confidence.
        assert!(outcome
            .session
            .turns()
            .iter()
            .all(|t| t.transcription_confidence == 1.0));
    }
}
