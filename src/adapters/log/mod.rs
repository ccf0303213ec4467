//! Execution log adapters.

mod jsonl_log;

pub use jsonl_log::{JsonlEventLog, NullEventLog};
