//! Plan domain module.
//!
//! Procedural plans, the business rules that classify them, fixed
//! fallback templates, and the step-by-step executor.

mod executor;
mod fallback;
mod plan;
mod rules;

pub use executor::{ExchangeEntry, ExecutionContext, PlanExecutor, StepResult};
pub use fallback::{fallback_draft, FALLBACK_NOTE};
pub use plan::{PlanPriority, PlanStep, ProceduralPlan};
pub use rules::BusinessRules;
