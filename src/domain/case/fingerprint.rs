//! Case fingerprint handed to plan generation.
//!
//! The JSON field names are stable: downstream planning subsystems read
//! them as-is.

use serde::{Deserialize, Serialize};

use super::{CaseRecord, ComplaintCategory, Emotion, EmotionIntensity, UrgencyLevel};

/// Case type taxonomy used by the planning rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "Billing_Dispute")]
    BillingDispute,
    #[serde(rename = "Refund_Request")]
    RefundRequest,
    #[serde(rename = "Technical_Support")]
    TechnicalSupport,
    #[serde(rename = "Account_Access")]
    AccountAccess,
    #[serde(rename = "Product_Complaint")]
    ProductComplaint,
    #[serde(rename = "General_Inquiry")]
    GeneralInquiry,
    #[serde(rename = "Escalation")]
    Escalation,
}

impl CaseType {
    /// Maps an interview category onto the planning taxonomy.
    pub fn from_category(category: ComplaintCategory) -> Self {
        match category {
            ComplaintCategory::Payment => Self::BillingDispute,
            ComplaintCategory::Refund => Self::RefundRequest,
            ComplaintCategory::Delivery | ComplaintCategory::ProductQuality => {
                Self::ProductComplaint
            }
            ComplaintCategory::AccountIssues => Self::AccountAccess,
            ComplaintCategory::CustomerService
            | ComplaintCategory::ContentModeration
            | ComplaintCategory::Other => Self::GeneralInquiry,
        }
    }

    /// Short lowercase label used in plan titles and log entries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BillingDispute => "billing_dispute",
            Self::RefundRequest => "refund_request",
            Self::TechnicalSupport => "technical_support",
            Self::AccountAccess => "account_access",
            Self::ProductComplaint => "product_complaint",
            Self::GeneralInquiry => "general_inquiry",
            Self::Escalation => "escalation",
        }
    }
}

/// Customer anger level derived from the emotion trail.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AngerLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl AngerLevel {
    /// Derives the anger level from the recorded emotion trail.
    ///
    /// The trail is scanned in full; the most severe observation wins.
    pub fn from_trail(record: &CaseRecord) -> Self {
        let mut level = Self::Low;
        for entry in &record.emotion_trail {
            let observed = match (entry.emotion, entry.intensity) {
                (Emotion::Angry, EmotionIntensity::High) => Self::Extreme,
                (Emotion::Angry, _) => Self::High,
                (Emotion::Frustrated | Emotion::Disappointed, EmotionIntensity::High) => {
                    Self::High
                }
                (Emotion::Frustrated | Emotion::Disappointed | Emotion::Worried, _) => {
                    Self::Moderate
                }
                _ => Self::Low,
            };
            level = level.max(observed);
        }
        level
    }
}

/// Structured representation of a finalized case, the input to plan
/// generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFingerprint {
    #[serde(rename = "Case_Type")]
    pub case_type: CaseType,
    #[serde(rename = "Urgency")]
    pub urgency: UrgencyLevel,
    #[serde(rename = "Customer_Anger_Level")]
    pub customer_anger_level: AngerLevel,
    #[serde(rename = "Request_Contains_Refund")]
    pub request_contains_refund: bool,
    #[serde(rename = "Account_Type")]
    pub account_type: String,
    #[serde(rename = "Previous_Interactions")]
    pub previous_interactions: u32,
    #[serde(rename = "Case_Age_Days")]
    pub case_age_days: u32,
    #[serde(rename = "Additional_Attributes")]
    pub additional_attributes: Vec<String>,
}

impl CaseFingerprint {
    /// Builds the fingerprint from a finalized case record.
    ///
    /// Fields the interview cannot know (account type, prior interactions,
    /// case age) take their neutral defaults; integration layers may
    /// enrich them from customer systems before planning.
    pub fn from_record(record: &CaseRecord) -> Self {
        let case_type = record
            .category
            .map(CaseType::from_category)
            .unwrap_or(CaseType::GeneralInquiry);

        let mut additional_attributes = Vec::new();
        if let Some(company) = &record.company_name {
            additional_attributes.push(format!("company:{company}"));
        }
        if let Some(order_id) = &record.order_id {
            additional_attributes.push(format!("order_id:{order_id}"));
        }
        if let Some(product) = &record.product_name {
            additional_attributes.push(format!("product:{product}"));
        }

        Self {
            case_type,
            urgency: record.urgency.unwrap_or(UrgencyLevel::Medium),
            customer_anger_level: AngerLevel::from_trail(record),
            request_contains_refund: mentions_refund(record),
            account_type: "Standard".to_string(),
            previous_interactions: 0,
            case_age_days: 0,
            additional_attributes,
        }
    }
}

fn mentions_refund(record: &CaseRecord) -> bool {
    if record.category == Some(ComplaintCategory::Refund) {
        return true;
    }
    record
        .description
        .as_deref()
        .map(|d| {
            let lower = d.to_lowercase();
            lower.contains("refund") || lower.contains("money back")
        })
        .unwrap_or(false)
}
