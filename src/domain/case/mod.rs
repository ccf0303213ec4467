//! Case domain module.
//!
//! The cumulative case record, its merge rules, the immutable turn
//! history, and the persisted artifacts other subsystems read.

mod category;
mod emotion;
mod fingerprint;
mod record;
mod report;
mod turn;
mod update;

pub use category::{ComplaintCategory, UrgencyLevel};
pub use emotion::{Emotion, EmotionEntry, EmotionIntensity, EmotionObservation};
pub use fingerprint::{AngerLevel, CaseFingerprint, CaseType};
pub use record::{CaseRecord, CaseRecordError, DESCRIPTION_SEPARATOR};
pub use report::{ConversationRecord, ExtractedData, HistoryEntry, SpeakerRole};
pub use turn::Turn;
pub use update::{FieldUpdate, FieldUpdateSource};
