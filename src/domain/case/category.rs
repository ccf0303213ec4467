//! Complaint classification enums.

use serde::{Deserialize, Serialize};

/// Category of a customer complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    Delivery,
    ProductQuality,
    Payment,
    Refund,
    CustomerService,
    AccountIssues,
    ContentModeration,
    Other,
}

impl ComplaintCategory {
    /// Parses a category from loosely-formatted collaborator output.
    ///
    /// Returns None for unrecognized or sentinel values so callers never
    /// overwrite a known category with noise.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "delivery" | "shipping" => Some(Self::Delivery),
            "product_quality" | "product quality" | "quality" => Some(Self::ProductQuality),
            "payment" | "billing" => Some(Self::Payment),
            "refund" | "return" => Some(Self::Refund),
            "customer_service" | "customer service" => Some(Self::CustomerService),
            "account_issues" | "account issues" | "account" => Some(Self::AccountIssues),
            "content_moderation" | "content moderation" => Some(Self::ContentModeration),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Urgency of a complaint, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// Parses an urgency level from loosely-formatted collaborator output.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "urgent" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Numeric urgency score used by the plan business rules.
    pub fn as_score(&self) -> f64 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.5,
            Self::High => 0.8,
            Self::Critical => 1.0,
        }
    }
}
