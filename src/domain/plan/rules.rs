//! Business rules for plan classification.
//!
//! Deterministic priority, escalation, and timing decisions applied to
//! every generated plan, whether the step list came from the collaborator
//! or from a fallback template.

use crate::domain::case::{AngerLevel, CaseFingerprint, CaseType};

use super::PlanPriority;

/// Company business rules for case classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessRules;

impl BusinessRules {
    /// Creates the rules engine.
    pub fn new() -> Self {
        Self
    }

    /// Classifies case priority from urgency, anger, and age.
    pub fn determine_priority(&self, fingerprint: &CaseFingerprint) -> PlanPriority {
        let urgency = fingerprint.urgency.as_score();
        let anger = fingerprint.customer_anger_level;
        let age = fingerprint.case_age_days;

        if urgency >= 0.9 || anger >= AngerLevel::High || age > 7 {
            PlanPriority::Critical
        } else if urgency >= 0.7 || anger == AngerLevel::Moderate || age > 3 {
            PlanPriority::High
        } else if urgency >= 0.4 || age > 1 {
            PlanPriority::Medium
        } else {
            PlanPriority::Low
        }
    }

    /// Returns true if the case class warrants a human in the loop from
    /// the start.
    pub fn requires_escalation(&self, fingerprint: &CaseFingerprint) -> bool {
        let dispute_prone = matches!(
            fingerprint.case_type,
            CaseType::BillingDispute | CaseType::Escalation | CaseType::ProductComplaint
        );
        dispute_prone
            || fingerprint.customer_anger_level >= AngerLevel::High
            || fingerprint.previous_interactions >= 3
            || fingerprint.urgency.as_score() >= 0.8
    }

    /// Estimates resolution time for the case type, prefixed by priority.
    pub fn estimate_resolution_time(
        &self,
        fingerprint: &CaseFingerprint,
        priority: PlanPriority,
    ) -> String {
        let base = match fingerprint.case_type {
            CaseType::BillingDispute => "2-4 hours",
            CaseType::RefundRequest => "1-2 hours",
            CaseType::TechnicalSupport => "30 minutes - 2 hours",
            CaseType::AccountAccess => "15-30 minutes",
            CaseType::ProductComplaint => "1-3 hours",
            CaseType::GeneralInquiry => "15-30 minutes",
            CaseType::Escalation => "4-24 hours",
        };

        match priority {
            PlanPriority::Critical => format!("URGENT: {base}"),
            PlanPriority::High => format!("Priority: {base}"),
            _ => base.to_string(),
        }
    }
}
