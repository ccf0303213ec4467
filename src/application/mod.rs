//! Application layer - session and resolution orchestration.
//!
//! Wires domain services to ports: one service runs the bounded intake
//! interview, the other walks the generated plan. Both log every decision
//! and persist the session artifacts.

mod intake;
mod resolution;

pub use intake::{IntakeOutcome, IntakeService};
pub use resolution::ResolutionService;
