//! Fixed fallback plan templates.
//!
//! Plan generation must never block a case: when the planning
//! collaborator fails, these per-category templates stand in.

use crate::domain::case::CaseType;
use crate::ports::PlanDraft;

use super::PlanStep;

/// Note appended to every fallback plan so reviewers can tell the two
/// generation paths apart.
pub const FALLBACK_NOTE: &str = "Generated using fallback procedures";

/// Builds the fixed fallback draft for a case type.
pub fn fallback_draft(case_type: CaseType) -> PlanDraft {
    let (plan_type, steps) = match case_type {
        CaseType::BillingDispute => (
            "Billing Dispute Resolution (Fallback)",
            vec![
                PlanStep::new(1, "Verify Account", "Verify customer account and billing history")
                    .with_team("Billing Team"),
                PlanStep::new(2, "Review Charges", "Review disputed charges and transactions")
                    .with_team("Billing Team"),
                PlanStep::new(
                    3,
                    "Determine Resolution",
                    "Determine appropriate resolution action",
                )
                .with_team("Billing Team"),
            ],
        ),
        CaseType::RefundRequest => (
            "Refund Request Resolution (Fallback)",
            vec![
                PlanStep::new(1, "Verify Eligibility", "Check refund policy eligibility"),
                PlanStep::new(2, "Process Request", "Process refund according to guidelines"),
                PlanStep::new(3, "Confirm Resolution", "Confirm refund with customer"),
            ],
        ),
        _ => (
            "General Resolution (Fallback)",
            vec![
                PlanStep::new(1, "Initial Review", "Review case details and customer history"),
                PlanStep::new(2, "Apply Procedures", "Apply relevant company procedures"),
                PlanStep::new(3, "Follow Up", "Follow up with customer on resolution"),
            ],
        ),
    };

    PlanDraft {
        plan_type: plan_type.to_string(),
        steps,
        special_notes: vec![FALLBACK_NOTE.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_template_routes_to_billing_team() {
        let draft = fallback_draft(CaseType::BillingDispute);
        assert_eq!(draft.steps.len(), 3);
        assert!(draft.steps.iter().all(|s| s.responsible_team == "Billing Team"));
    }

    #[test]
    fn refund_template_has_three_steps() {
        let draft = fallback_draft(CaseType::RefundRequest);
        assert_eq!(draft.steps.len(), 3);
        assert_eq!(draft.steps[0].action, "Verify Eligibility");
    }

    #[test]
    fn other_case_types_get_the_general_template() {
        for case_type in [
            CaseType::TechnicalSupport,
            CaseType::AccountAccess,
            CaseType::ProductComplaint,
            CaseType::GeneralInquiry,
            CaseType::Escalation,
        ] {
            let draft = fallback_draft(case_type);
            assert_eq!(draft.steps.len(), 3, "{case_type:?}");
            assert!(draft.special_notes.contains(&FALLBACK_NOTE.to_string()));
        }
    }

    #[test]
    fn steps_are_numbered_sequentially() {
        let draft = fallback_draft(CaseType::GeneralInquiry);
        let numbers: Vec<u32> = draft.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
