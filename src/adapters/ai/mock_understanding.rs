//! Mock text understanding for testing.
//!
//! Configurable queued responses, error injection, and call tracking, so
//! sessions can run without a real NLU backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{TextUnderstanding, UnderstandingError};

/// A configured mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(UnderstandingError),
}

/// Mock understanding collaborator.
///
/// Extraction and question responses are queued separately and consumed
/// in order; a drained queue reports the collaborator as unavailable.
#[derive(Debug, Clone, Default)]
pub struct MockUnderstanding {
    extractions: Arc<Mutex<VecDeque<MockResponse>>>,
    questions: Arc<Mutex<VecDeque<MockResponse>>>,
    extract_prompts: Arc<Mutex<Vec<String>>>,
    question_prompts: Arc<Mutex<Vec<String>>>,
}

impl MockUnderstanding {
    /// Creates a mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful extraction response.
    pub fn with_extraction(self, response: impl Into<String>) -> Self {
        self.extractions
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(response.into()));
        self
    }

    /// Queues an extraction failure.
    pub fn with_extraction_error(self, error: UnderstandingError) -> Self {
        self.extractions
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Queues a successful question response.
    pub fn with_question(self, response: impl Into<String>) -> Self {
        self.questions
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(response.into()));
        self
    }

    /// The extraction prompts received so far.
    pub fn extract_prompts(&self) -> Vec<String> {
        self.extract_prompts.lock().unwrap().clone()
    }

    /// The question prompts received so far.
    pub fn question_prompts(&self) -> Vec<String> {
        self.question_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextUnderstanding for MockUnderstanding {
    async fn extract(&self, prompt: &str) -> Result<String, UnderstandingError> {
        self.extract_prompts.lock().unwrap().push(prompt.to_string());
        match self.extractions.lock().unwrap().pop_front() {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(error)) => Err(error),
            None => Err(UnderstandingError::Unavailable(
                "mock extraction queue drained".to_string(),
            )),
        }
    }

    async fn generate_question(&self, prompt: &str) -> Result<String, UnderstandingError> {
        self.question_prompts.lock().unwrap().push(prompt.to_string());
        match self.questions.lock().unwrap().pop_front() {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(error)) => Err(error),
            None => Err(UnderstandingError::Unavailable(
                "mock question queue drained".to_string(),
            )),
        }
    }
}
