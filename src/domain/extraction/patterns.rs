//! Deterministic pattern extraction.
//!
//! The fallback path when the understanding collaborator is unavailable
//! or returns unparsable output: the targeted slot decides which patterns
//! run against the raw utterance.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::case::{FieldUpdate, FieldUpdateSource};
use crate::domain::company::detect_company;
use crate::domain::dialogue::Slot;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    // Optional country/area prefix, then a 3+4 digit core: matches
    // "555-0123", "(415) 555-0123", "+1 415 555 0123".
    Regex::new(r"(?:\+?\d{1,3}[\s.-]?)?(?:\(\d{3}\)[\s.-]?|\d{3}[\s.-])?\d{3}[\s.-]\d{4}")
        .expect("phone pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

static ORDER_ID_RE: Lazy<Regex> = Lazy::new(|| {
    // Marketplace order formats: "OD" prefixed runs, 112-style segmented
    // numbers, and generic letter-prefixed references.
    Regex::new(r"\b(?:OD\d{8,}|\d{3}-\d{7}-\d{7}|[A-Z]{2,5}-?\d{6,})\b")
        .expect("order id pattern is valid")
});

/// Runs the deterministic patterns for one targeted slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    /// Creates a pattern extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extracts whatever the slot's patterns find in the raw text.
    ///
    /// Slots without a reliable pattern store the utterance verbatim as a
    /// description fragment, so nothing the customer said is lost.
    pub fn extract_for_slot(&self, slot: Slot, raw_text: &str) -> FieldUpdate {
        let mut update = FieldUpdate::empty(FieldUpdateSource::Fallback);
        match slot {
            Slot::ContactInfo => {
                update.customer_phone = find_phone(raw_text);
                update.customer_email = find_email(raw_text);
                if update.is_empty() {
                    update.description = Some(raw_text.to_string());
                }
            }
            Slot::Identity => {
                if let Some((company, confidence)) = detect_company(raw_text) {
                    update.company_name = Some(company);
                    update.company_confidence = confidence;
                }
                update.description = Some(raw_text.to_string());
            }
            Slot::OrderDetails => {
                update.order_id = find_order_id(raw_text);
                if update.order_id.is_none() {
                    update.description = Some(raw_text.to_string());
                }
            }
            Slot::ProblemDescription => {
                update.description = Some(raw_text.to_string());
            }
        }
        update
    }
}

fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().trim().to_string())
}

fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

fn find_order_id(text: &str) -> Option<String> {
    ORDER_ID_RE.find(text).map(|m| m.as_str().to_string())
}
