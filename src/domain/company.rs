//! Data-driven company profiles.
//!
//! One generic dialogue controller parameterized by a profile value object
//! replaces per-company agent variants: the vocabulary, detection keywords,
//! and canned wording are data.

use serde::{Deserialize, Serialize};

use super::dialogue::Slot;

/// Confidence assigned when a primary keyword (the company name itself)
/// appears in an utterance.
const PRIMARY_KEYWORD_CONFIDENCE: f64 = 0.95;

/// Confidence assigned when only a secondary indicator (product line,
/// domain, service name) appears.
const SECONDARY_KEYWORD_CONFIDENCE: f64 = 0.8;

/// Vocabulary and canned wording for one company's intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Stable lowercase key ("amazon", "generic", ...).
    pub key: String,
    /// Human-facing name.
    pub display_name: String,
    /// Keywords that directly name the company.
    pub primary_keywords: Vec<String>,
    /// Weaker indicators: product lines, domains, sibling brands.
    pub secondary_keywords: Vec<String>,
    /// Opening question for the interview.
    pub greeting: String,
    /// Message spoken when the interview completes normally.
    pub completion_message: String,
    /// Polite hand-off message used on escalation.
    pub handoff_message: String,
}

impl CompanyProfile {
    /// Canned wording for a targeted slot, used when the question
    /// collaborator is unavailable.
    pub fn question_for(&self, slot: Slot) -> &'static str {
        match slot {
            Slot::Identity => {
                "Could you please tell me your name and which company this complaint is about?"
            }
            Slot::ProblemDescription => {
                "Could you describe the issue you're experiencing in as much detail as possible?"
            }
            Slot::OrderDetails => {
                "If this involves an order or transaction, could you share the order number or the product involved?"
            }
            Slot::ContactInfo => {
                "Could you please provide your phone number or email address for our records?"
            }
        }
    }

    /// Scores this profile against an utterance.
    ///
    /// Primary keywords dominate; a secondary hit alone gives a weaker
    /// estimate. Returns None when nothing matches.
    pub fn detection_confidence(&self, utterance: &str) -> Option<f64> {
        let lower = utterance.to_lowercase();
        if self
            .primary_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
        {
            return Some(PRIMARY_KEYWORD_CONFIDENCE);
        }
        if self
            .secondary_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
        {
            return Some(SECONDARY_KEYWORD_CONFIDENCE);
        }
        None
    }

    /// The profile used when no company is ever detected.
    pub fn generic() -> Self {
        Self {
            key: "generic".to_string(),
            display_name: "Customer Service".to_string(),
            primary_keywords: vec![],
            secondary_keywords: vec![],
            greeting: "Hello! I'm here to help you with your complaint today. To get started, \
                       could you please tell me your name and briefly describe the issue you're \
                       experiencing?"
                .to_string(),
            completion_message: "Thank you for providing that information. I've recorded all the \
                                 details about your complaint and we'll work on resolving this \
                                 for you as soon as possible."
                .to_string(),
            handoff_message: "I understand this is important to you. I'm connecting you with one \
                              of our specialized agents who can provide more detailed \
                              assistance. They'll have access to your full conversation history \
                              and case details. Please hold for just a moment."
                .to_string(),
        }
    }

    /// The built-in profile table.
    pub fn builtin() -> Vec<Self> {
        let generic = Self::generic();
        vec![
            Self {
                key: "amazon".to_string(),
                display_name: "Amazon".to_string(),
                primary_keywords: vec!["amazon".to_string(), "amazon.com".to_string()],
                secondary_keywords: vec![
                    "prime".to_string(),
                    "alexa".to_string(),
                    "echo".to_string(),
                    "kindle".to_string(),
                ],
                ..generic.clone()
            },
            Self {
                key: "flipkart".to_string(),
                display_name: "Flipkart".to_string(),
                primary_keywords: vec!["flipkart".to_string(), "flipkart.com".to_string()],
                secondary_keywords: vec!["flipkart plus".to_string()],
                ..generic.clone()
            },
            Self {
                key: "facebook".to_string(),
                display_name: "Facebook".to_string(),
                primary_keywords: vec![
                    "facebook".to_string(),
                    "facebook.com".to_string(),
                    "meta".to_string(),
                ],
                secondary_keywords: vec![
                    "instagram".to_string(),
                    "whatsapp".to_string(),
                    "fb".to_string(),
                ],
                ..generic
            },
        ]
    }

    /// Looks up a built-in profile by key, falling back to generic.
    pub fn by_key(key: &str) -> Self {
        Self::builtin()
            .into_iter()
            .find(|p| p.key == key)
            .unwrap_or_else(Self::generic)
    }
}

/// Scans the built-in profiles for a company mention in an utterance.
///
/// The best-scoring profile wins; ties go to table order.
pub fn detect_company(utterance: &str) -> Option<(String, f64)> {
    let mut best: Option<(String, f64)> = None;
    for profile in CompanyProfile::builtin() {
        if let Some(confidence) = profile.detection_confidence(utterance) {
            match &best {
                Some((_, existing)) if *existing >= confidence => {}
                _ => best = Some((profile.key.clone(), confidence)),
            }
        }
    }
    best
}
