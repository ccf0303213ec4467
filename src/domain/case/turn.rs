//! Immutable record of one question/response exchange.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::FieldUpdate;

/// One completed exchange in the interview.
///
/// Created by the dialogue controller and never mutated afterwards; the
/// session's turn history is an append-only sequence of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub turn_index: u32,
    pub question: String,
    pub raw_response_text: String,
    pub transcription_confidence: f64,
    pub extracted_fields: FieldUpdate,
    pub confidence_score: f64,
    pub timestamp: Timestamp,
}

impl Turn {
    /// Records a completed exchange.
    pub fn new(
        turn_index: u32,
        question: impl Into<String>,
        raw_response_text: impl Into<String>,
        transcription_confidence: f64,
        extracted_fields: FieldUpdate,
        confidence_score: f64,
    ) -> Self {
        Self {
            turn_index,
            question: question.into(),
            raw_response_text: raw_response_text.into(),
            transcription_confidence,
            extracted_fields,
            confidence_score,
            timestamp: Timestamp::now(),
        }
    }
}
