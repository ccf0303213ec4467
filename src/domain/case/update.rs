//! Partial case updates produced by turn extraction.

use serde::{Deserialize, Serialize};

use super::{ComplaintCategory, EmotionObservation, UrgencyLevel};

/// How a field update was obtained.
///
/// Callers branch on this exhaustively instead of catching errors: a
/// `Fallback` update is a normal result, and `Failed` still records the
/// turn (with nothing to merge) so the turn history stays complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldUpdateSource {
    /// Structured output from the understanding collaborator parsed cleanly.
    Parsed,
    /// Deterministic pattern extraction stood in for the collaborator.
    Fallback,
    /// The utterance was empty or no extraction path produced anything.
    Failed,
}

/// A partial map of case fields extracted from one turn, plus an optional
/// emotion observation.
///
/// All fields default to absent; merging into the case record is the
/// caller's job ([`CaseRecord::apply`](super::CaseRecord::apply)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub source: FieldUpdateSource,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub description: Option<String>,
    pub category: Option<ComplaintCategory>,
    pub urgency: Option<UrgencyLevel>,
    pub order_id: Option<String>,
    pub product_name: Option<String>,
    pub purchase_date: Option<String>,
    pub company_name: Option<String>,
    /// Confidence of the company estimate; meaningful only with a name.
    pub company_confidence: f64,
    pub emotion: Option<EmotionObservation>,
}

impl FieldUpdate {
    /// Creates an empty update with the given provenance.
    pub fn empty(source: FieldUpdateSource) -> Self {
        Self {
            source,
            customer_name: None,
            customer_phone: None,
            customer_email: None,
            customer_address: None,
            description: None,
            category: None,
            urgency: None,
            order_id: None,
            product_name: None,
            purchase_date: None,
            company_name: None,
            company_confidence: 0.0,
            emotion: None,
        }
    }

    /// The sentinel update for a turn where nothing could be extracted.
    pub fn failed() -> Self {
        Self::empty(FieldUpdateSource::Failed)
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the company estimate.
    pub fn with_company(mut self, name: impl Into<String>, confidence: f64) -> Self {
        self.company_name = Some(name.into());
        self.company_confidence = confidence;
        self
    }

    /// Returns true if no field carries a value and no emotion was observed.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.customer_phone.is_none()
            && self.customer_email.is_none()
            && self.customer_address.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.urgency.is_none()
            && self.order_id.is_none()
            && self.product_name.is_none()
            && self.purchase_date.is_none()
            && self.company_name.is_none()
            && self.emotion.is_none()
    }
}
