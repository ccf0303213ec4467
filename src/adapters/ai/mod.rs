//! AI collaborator adapters.

mod mock_understanding;
mod timeout_understanding;

pub use mock_understanding::MockUnderstanding;
pub use timeout_understanding::TimeoutUnderstanding;
