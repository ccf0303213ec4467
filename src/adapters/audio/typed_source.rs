//! Typed-text utterance source.
//!
//! The degraded-mode input path: answers arrive as text with full
//! transcription confidence. Also the natural way to script sessions in
//! tests.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::ports::{CaptureError, Utterance, UtteranceSource};

/// Serves utterances from a pre-filled queue of text answers.
#[derive(Debug, Default)]
pub struct QueuedTextSource {
    answers: VecDeque<String>,
}

impl QueuedTextSource {
    /// Creates a source with the given answers, served in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends another answer to the queue.
    pub fn push(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    /// Remaining queued answers.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl UtteranceSource for QueuedTextSource {
    async fn next_utterance(&mut self, _prompt: &str) -> Result<Utterance, CaptureError> {
        self.answers
            .pop_front()
            .map(Utterance::typed)
            .ok_or(CaptureError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_answers_in_order() {
        let mut source = QueuedTextSource::new(["first answer", "second answer"]);
        assert_eq!(
            source.next_utterance("q1").await.unwrap().text,
            "first answer"
        );
        assert_eq!(
            source.next_utterance("q2").await.unwrap().text,
            "second answer"
        );
        assert_eq!(
            source.next_utterance("q3").await,
            Err(CaptureError::Exhausted)
        );
    }

    #[tokio::test]
    async fn typed_answers_have_full_confidence() {
        let mut source = QueuedTextSource::new(["hello"]);
        let utterance = source.next_utterance("q").await.unwrap();
        assert_eq!(utterance.transcription_confidence, 1.0);
    }
}
