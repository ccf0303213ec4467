//! The cumulative case record built across a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{SessionId, Timestamp};

use super::{ComplaintCategory, EmotionEntry, FieldUpdate, UrgencyLevel};

/// Separator used when concatenating description fragments across turns.
pub const DESCRIPTION_SEPARATOR: &str = " | ";

/// Errors raised by case record mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseRecordError {
    #[error("Case record is frozen; session reached a terminal state")]
    Frozen,
}

/// The single mutable record accumulated across an intake session.
///
/// Merge rules:
/// - scalar fields are last-non-null-wins and are never overwritten by
///   empty values;
/// - `description` concatenates fragments unless the new value duplicates
///   the stored one;
/// - the company estimate only improves: name and confidence are replaced
///   together, and only when the new confidence is strictly greater;
/// - the emotion trail is append-only.
///
/// Once [`freeze`](Self::freeze) is called the record rejects all further
/// updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub session_id: SessionId,
    pub created_at: Timestamp,

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
    pub company_confidence: f64,

    pub emotion_trail: Vec<EmotionEntry>,

    #[serde(skip)]
    frozen: bool,
}

impl CaseRecord {
    /// Creates an empty record for a new session.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            created_at: Timestamp::now(),
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
            emotion_trail: Vec::new(),
            frozen: false,
        }
    }

    /// Merges a field update into the record under the merge rules.
    ///
    /// The emotion observation, if any, is pinned to `turn_index` and
    /// appended to the trail.
    pub fn apply(&mut self, update: &FieldUpdate, turn_index: u32) -> Result<(), CaseRecordError> {
        if self.frozen {
            return Err(CaseRecordError::Frozen);
        }

        merge_scalar(&mut self.customer_name, &update.customer_name);
        merge_scalar(&mut self.customer_phone, &update.customer_phone);
        merge_scalar(&mut self.customer_email, &update.customer_email);
        merge_scalar(&mut self.customer_address, &update.customer_address);
        merge_scalar(&mut self.order_id, &update.order_id);
        merge_scalar(&mut self.product_name, &update.product_name);
        merge_scalar(&mut self.purchase_date, &update.purchase_date);

        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(urgency) = update.urgency {
            self.urgency = Some(urgency);
        }

        self.merge_description(&update.description);
        self.merge_company(&update.company_name, update.company_confidence);

        if let Some(observation) = &update.emotion {
            self.emotion_trail
                .push(EmotionEntry::from_observation(turn_index, observation.clone()));
        }

        Ok(())
    }

    /// Marks the record read-only. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns true once the record has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Returns true if any complaint or customer field has been filled.
    pub fn has_any_data(&self) -> bool {
        self.customer_name.is_some()
            || self.customer_phone.is_some()
            || self.customer_email.is_some()
            || self.customer_address.is_some()
            || self.description.is_some()
            || self.order_id.is_some()
            || self.product_name.is_some()
            || self.company_name.is_some()
    }

    /// Returns true if the customer left any contact channel.
    pub fn has_contact_info(&self) -> bool {
        self.customer_phone.is_some() || self.customer_email.is_some()
    }

    fn merge_description(&mut self, incoming: &Option<String>) {
        let Some(new) = non_empty(incoming) else {
            return;
        };
        match &mut self.description {
            None => self.description = Some(new.to_string()),
            Some(existing) => {
                // Strict duplicates are dropped rather than concatenated.
                if existing != new {
                    existing.push_str(DESCRIPTION_SEPARATOR);
                    existing.push_str(new);
                }
            }
        }
    }

    fn merge_company(&mut self, name: &Option<String>, confidence: f64) {
        let Some(name) = non_empty(name) else {
            return;
        };
        if confidence > self.company_confidence {
            self.company_name = Some(name.to_string());
            self.company_confidence = confidence;
        }
    }
}

/// Last-non-null-wins: only a non-empty incoming value replaces the slot.
fn merge_scalar(slot: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = non_empty(incoming) {
        *slot = Some(value.to_string());
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::case::{Emotion, EmotionIntensity, EmotionObservation, FieldUpdateSource};
    use proptest::prelude::*;

    fn record() -> CaseRecord {
        CaseRecord::new(SessionId::new())
    }

    fn update() -> FieldUpdate {
        FieldUpdate::empty(FieldUpdateSource::Parsed)
    }

    mod scalar_merge {
        use super::*;

        #[test]
        fn sets_field_from_non_empty_value() {
            let mut rec = record();
            let mut up = update();
            up.customer_name = Some("John".to_string());
            rec.apply(&up, 0).unwrap();
            assert_eq!(rec.customer_name.as_deref(), Some("John"));
        }

        #[test]
        fn never_overwrites_with_none() {
            let mut rec = record();
            let mut up = update();
            up.customer_phone = Some("555-0123".to_string());
            rec.apply(&up, 0).unwrap();

            rec.apply(&update(), 1).unwrap();
            assert_eq!(rec.customer_phone.as_deref(), Some("555-0123"));
        }

        #[test]
        fn never_overwrites_with_empty_string() {
            let mut rec = record();
            let mut up = update();
            up.customer_email = Some("jo@example.com".to_string());
            rec.apply(&up, 0).unwrap();

            let mut blank = update();
            blank.customer_email = Some("   ".to_string());
            rec.apply(&blank, 1).unwrap();
            assert_eq!(rec.customer_email.as_deref(), Some("jo@example.com"));
        }

        #[test]
        fn last_non_null_wins() {
            let mut rec = record();
            let mut first = update();
            first.product_name = Some("toaster".to_string());
            rec.apply(&first, 0).unwrap();

            let mut second = update();
            second.product_name = Some("kettle".to_string());
            rec.apply(&second, 1).unwrap();
            assert_eq!(rec.product_name.as_deref(), Some("kettle"));
        }
    }

    mod description_merge {
        use super::*;

        #[test]
        fn first_fragment_is_stored_verbatim() {
            let mut rec = record();
            rec.apply(&update().with_description("box arrived crushed"), 0)
                .unwrap();
            assert_eq!(rec.description.as_deref(), Some("box arrived crushed"));
        }

        #[test]
        fn later_fragments_are_concatenated() {
            let mut rec = record();
            rec.apply(&update().with_description("box arrived crushed"), 0)
                .unwrap();
            rec.apply(&update().with_description("item inside is broken"), 1)
                .unwrap();
            assert_eq!(
                rec.description.as_deref(),
                Some("box arrived crushed | item inside is broken")
            );
        }

        #[test]
        fn strict_duplicates_are_dropped() {
            let mut rec = record();
            rec.apply(&update().with_description("box arrived crushed"), 0)
                .unwrap();
            rec.apply(&update().with_description("box arrived crushed"), 1)
                .unwrap();
            assert_eq!(rec.description.as_deref(), Some("box arrived crushed"));
        }
    }

    mod company_merge {
        use super::*;

        #[test]
        fn higher_confidence_replaces_estimate() {
            let mut rec = record();
            rec.apply(&update().with_company("amazon", 0.7), 0).unwrap();
            rec.apply(&update().with_company("flipkart", 0.9), 1).unwrap();
            assert_eq!(rec.company_name.as_deref(), Some("flipkart"));
            assert_eq!(rec.company_confidence, 0.9);
        }

        #[test]
        fn lower_confidence_is_ignored() {
            let mut rec = record();
            rec.apply(&update().with_company("amazon", 0.9), 0).unwrap();
            rec.apply(&update().with_company("flipkart", 0.5), 1).unwrap();
            assert_eq!(rec.company_name.as_deref(), Some("amazon"));
            assert_eq!(rec.company_confidence, 0.9);
        }

        #[test]
        fn equal_confidence_is_ignored() {
            let mut rec = record();
            rec.apply(&update().with_company("amazon", 0.8), 0).unwrap();
            rec.apply(&update().with_company("flipkart", 0.8), 1).unwrap();
            assert_eq!(rec.company_name.as_deref(), Some("amazon"));
        }
    }

    mod emotion_trail {
        use super::*;

        #[test]
        fn observations_append_in_turn_order() {
            let mut rec = record();
            let mut up = update();
            up.emotion = Some(EmotionObservation::new(
                Emotion::Frustrated,
                EmotionIntensity::Medium,
                vec!["annoyed".to_string()],
            ));
            rec.apply(&up, 0).unwrap();

            let mut up2 = update();
            up2.emotion = Some(EmotionObservation::new(
                Emotion::Angry,
                EmotionIntensity::High,
                vec![],
            ));
            rec.apply(&up2, 1).unwrap();

            assert_eq!(rec.emotion_trail.len(), 2);
            assert_eq!(rec.emotion_trail[0].turn_index, 0);
            assert_eq!(rec.emotion_trail[1].emotion, Emotion::Angry);
        }
    }

    mod freeze {
        use super::*;

        #[test]
        fn frozen_record_rejects_updates() {
            let mut rec = record();
            rec.freeze();
            let mut up = update();
            up.customer_name = Some("John".to_string());
            assert_eq!(rec.apply(&up, 0), Err(CaseRecordError::Frozen));
            assert!(rec.customer_name.is_none());
        }

        #[test]
        fn freeze_is_idempotent() {
            let mut rec = record();
            rec.freeze();
            rec.freeze();
            assert!(rec.is_frozen());
        }
    }

    proptest! {
        // Company confidence is non-decreasing over any update sequence.
        #[test]
        fn company_confidence_is_monotonic(confidences in prop::collection::vec(0.0f64..1.0, 1..20)) {
            let mut rec = record();
            let mut last = rec.company_confidence;
            for (i, c) in confidences.iter().enumerate() {
                rec.apply(&update().with_company("acme", *c), i as u32).unwrap();
                prop_assert!(rec.company_confidence >= last);
                last = rec.company_confidence;
            }
        }

        // Scalar fields, once set, are never cleared by later updates.
        #[test]
        fn name_never_cleared(values in prop::collection::vec(prop::option::of("[a-z ]{0,8}"), 1..10)) {
            let mut rec = record();
            let mut up = update();
            up.customer_name = Some("First".to_string());
            rec.apply(&up, 0).unwrap();

            for (i, v) in values.iter().enumerate() {
                let mut next = update();
                next.customer_name = v.clone();
                rec.apply(&next, (i + 1) as u32).unwrap();
                prop_assert!(rec.customer_name.is_some());
            }
        }
    }
}
