//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AudioSource` - chunked PCM capture device
//! - `SpeechRecognizer` - speech-to-text engine
//! - `SpeechSynthesizer` - text-to-speech output (optional)
//! - `TextUnderstanding` - NLU/LLM extraction and question wording
//! - `UtteranceSource` - one-utterance acquisition (voice/text/failover)
//! - `PlanGenerator` - procedural plan authoring
//! - `StepResponder` - per-step task execution
//! - `EventLog` - append-only execution log
//! - `SessionArchive` - persisted conversation records and escalation log

mod audio_source;
mod event_log;
mod plan_generator;
mod session_archive;
mod speech_recognizer;
mod speech_synthesizer;
mod step_responder;
mod understanding;
mod utterance_source;

pub use audio_source::{AudioSource, AudioSourceError};
pub use event_log::{EventLog, EventLogError, EventType, ExecutionEvent};
pub use session_archive::{ArchiveError, SessionArchive};
pub use plan_generator::{PlanDraft, PlanGenerationError, PlanGenerator};
pub use speech_recognizer::{
    SpeechRecognizer, Transcription, TranscriptionError, NO_SPEECH_SENTINEL,
};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use step_responder::{StepResponder, StepResponderError};
pub use understanding::{TextUnderstanding, UnderstandingError};
pub use utterance_source::{CaptureError, InputMode, Utterance, UtteranceSource};
