//! Missing-slot targeting for next-question selection.
//!
//! Which slot to ask about next is a deterministic priority decision made
//! locally; only the wording of the question may come from a collaborator.
//! This guarantees the interview terminates and is testable.

use serde::{Deserialize, Serialize};

use crate::domain::case::CaseRecord;

/// An information slot the interview can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Customer name and company identification.
    Identity,
    /// What went wrong.
    ProblemDescription,
    /// Order number or product involved.
    OrderDetails,
    /// Phone or email for follow-up.
    ContactInfo,
}

impl Slot {
    /// The fixed targeting priority: name, then the problem, then
    /// order/product identifiers, then contact info.
    pub const PRIORITY: [Slot; 4] = [
        Slot::Identity,
        Slot::ProblemDescription,
        Slot::OrderDetails,
        Slot::ContactInfo,
    ];

    /// Returns true if the record already holds this slot's information.
    pub fn is_filled(&self, record: &CaseRecord) -> bool {
        match self {
            Slot::Identity => record.customer_name.is_some(),
            Slot::ProblemDescription => record.description.is_some(),
            Slot::OrderDetails => record.order_id.is_some() || record.product_name.is_some(),
            Slot::ContactInfo => record.has_contact_info(),
        }
    }

    /// Picks the most valuable still-missing slot, if any.
    pub fn next_missing(record: &CaseRecord) -> Option<Slot> {
        Self::PRIORITY.into_iter().find(|slot| !slot.is_filled(record))
    }
}
