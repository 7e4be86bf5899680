//! Feedback collaboration point.
//!
//! After each completed turn the caller hands the (question, answer) pair
//! and the model identifier to a feedback sink, which returns a record id
//! that later thumbs-up/down signals can reference. Storage itself is an
//! external concern; this crate only defines the seam.

use grantscope_core::AppResult;
use serde::{Deserialize, Serialize};

/// A logged prompt/answer pair, keyed for later feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Identifier later feedback is keyed by
    pub id: String,

    pub question: String,
    pub answer: String,

    /// Model that produced the answer
    pub model: String,
}

/// Trait for feedback collectors.
pub trait FeedbackSink: Send + Sync {
    /// Log one completed turn, returning its record.
    fn log_prompt(&self, question: &str, answer: &str, model: &str) -> AppResult<FeedbackRecord>;
}

/// Sink that assigns record ids but stores nothing.
#[derive(Debug, Default)]
pub struct NullFeedbackSink;

impl FeedbackSink for NullFeedbackSink {
    fn log_prompt(&self, question: &str, answer: &str, model: &str) -> AppResult<FeedbackRecord> {
        Ok(FeedbackRecord {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            model: model.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_assigns_distinct_ids() {
        let sink = NullFeedbackSink;
        let first = sink
            .log_prompt("What is X?", "X does Y", "gpt-3.5-turbo-16k")
            .unwrap();
        let second = sink
            .log_prompt("What is X?", "X does Y", "gpt-3.5-turbo-16k")
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.question, "What is X?");
        assert_eq!(first.model, "gpt-3.5-turbo-16k");
    }
}
