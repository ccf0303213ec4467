//! The persisted conversation-record artifact.
//!
//! Field names are stable: other subsystems parse these files.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::{CaseRecord, ComplaintCategory, EmotionEntry, UrgencyLevel};

/// Who produced a message in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    Agent,
    Customer,
}

/// One line of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: SpeakerRole,
    pub message: String,
}

impl HistoryEntry {
    /// Creates an agent line.
    pub fn agent(message: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Agent,
            message: message.into(),
        }
    }

    /// Creates a customer line.
    pub fn customer(message: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Customer,
            message: message.into(),
        }
    }
}

/// The case fields as they appear in the persisted artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub problem_description: Option<String>,
    pub problem_category: Option<ComplaintCategory>,
    pub urgency_level: Option<UrgencyLevel>,
    pub order_id: Option<String>,
    pub product_name: Option<String>,
    pub purchase_date: Option<String>,
    pub company_name: Option<String>,
    pub company_confidence: f64,
}

impl ExtractedData {
    /// Projects the stable field view out of a case record.
    pub fn from_record(record: &CaseRecord) -> Self {
        Self {
            customer_name: record.customer_name.clone(),
            customer_phone: record.customer_phone.clone(),
            customer_email: record.customer_email.clone(),
            customer_address: record.customer_address.clone(),
            problem_description: record.description.clone(),
            problem_category: record.category,
            urgency_level: record.urgency,
            order_id: record.order_id.clone(),
            product_name: record.product_name.clone(),
            purchase_date: record.purchase_date.clone(),
            company_name: record.company_name.clone(),
            company_confidence: record.company_confidence,
        }
    }
}

/// The complete session artifact written when a session terminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub session_id: SessionId,
    pub timestamp: Timestamp,
    pub conversation_history: Vec<HistoryEntry>,
    pub extracted_data: ExtractedData,
    pub emotion_tracking: Vec<EmotionEntry>,
    pub total_questions: u32,
}

impl ConversationRecord {
    /// Assembles the artifact from a terminal session.
    pub fn new(
        record: &CaseRecord,
        conversation_history: Vec<HistoryEntry>,
        total_questions: u32,
    ) -> Self {
        Self {
            session_id: record.session_id,
            timestamp: Timestamp::now(),
            conversation_history,
            extracted_data: ExtractedData::from_record(record),
            emotion_tracking: record.emotion_trail.clone(),
            total_questions,
        }
    }

    /// Reconstructs a case record from the artifact.
    ///
    /// The rebuilt record starts unfrozen; it carries the artifact's
    /// session identity and extracted fields.
    pub fn to_case_record(&self) -> CaseRecord {
        let mut record = CaseRecord::new(self.session_id);
        record.created_at = self.timestamp;
        record.customer_name = self.extracted_data.customer_name.clone();
        record.customer_phone = self.extracted_data.customer_phone.clone();
        record.customer_email = self.extracted_data.customer_email.clone();
        record.customer_address = self.extracted_data.customer_address.clone();
        record.description = self.extracted_data.problem_description.clone();
        record.category = self.extracted_data.problem_category;
        record.urgency = self.extracted_data.urgency_level;
        record.order_id = self.extracted_data.order_id.clone();
        record.product_name = self.extracted_data.product_name.clone();
        record.purchase_date = self.extracted_data.purchase_date.clone();
        record.company_name = self.extracted_data.company_name.clone();
        record.company_confidence = self.extracted_data.company_confidence;
        record.emotion_trail = self.emotion_tracking.clone();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::case::{FieldUpdate, FieldUpdateSource};

    fn populated_record() -> CaseRecord {
        let mut record = CaseRecord::new(SessionId::new());
        let mut update = FieldUpdate::empty(FieldUpdateSource::Parsed);
        update.customer_name = Some("John".to_string());
        update.customer_phone = Some("555-0123".to_string());
        update.description = Some("parcel never arrived".to_string());
        update.category = Some(ComplaintCategory::Delivery);
        update.urgency = Some(UrgencyLevel::High);
        update.company_name = Some("amazon".to_string());
        update.company_confidence = 0.9;
        record.apply(&update, 0).unwrap();
        record
    }

    #[test]
    fn record_round_trips_through_artifact_json() {
        let original = populated_record();
        let artifact = ConversationRecord::new(
            &original,
            vec![
                HistoryEntry::agent("How can I help?"),
                HistoryEntry::customer("My parcel never arrived"),
            ],
            3,
        );

        let json = serde_json::to_string(&artifact).unwrap();
        let parsed: ConversationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, artifact);

        let rebuilt = parsed.to_case_record();
        assert_eq!(rebuilt.customer_name, original.customer_name);
        assert_eq!(rebuilt.customer_phone, original.customer_phone);
        assert_eq!(rebuilt.description, original.description);
        assert_eq!(rebuilt.category, original.category);
        assert_eq!(rebuilt.urgency, original.urgency);
        assert_eq!(rebuilt.company_name, original.company_name);
        assert_eq!(rebuilt.company_confidence, original.company_confidence);
        assert_eq!(rebuilt.emotion_trail, original.emotion_trail);
        assert_eq!(rebuilt.session_id, original.session_id);
    }

    #[test]
    fn artifact_uses_stable_field_names() {
        let artifact = ConversationRecord::new(&populated_record(), vec![], 1);
        let value = serde_json::to_value(&artifact).unwrap();
        assert!(value.get("session_id").is_some());
        assert!(value.get("conversation_history").is_some());
        assert!(value.get("extracted_data").is_some());
        assert!(value.get("emotion_tracking").is_some());
        assert!(value.get("total_questions").is_some());
        let data = value.get("extracted_data").unwrap();
        assert!(data.get("problem_description").is_some());
        assert!(data.get("urgency_level").is_some());
        assert!(data.get("company_confidence").is_some());
    }

    #[test]
    fn history_entry_roles_serialize_lowercase() {
        let entry = HistoryEntry::agent("hello");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value.get("role").unwrap(), "agent");
    }
}
