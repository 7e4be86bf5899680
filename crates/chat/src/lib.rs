//! Conversational answering core for GrantScope.
//!
//! Orchestrates policy filtering, threshold retrieval, prompt assembly and
//! single-call generation into one answer per question, with explicit
//! per-session conversation state.

pub mod answerer;
pub mod feedback;
pub mod history;
pub mod policy;
pub mod types;

// Re-export commonly used types
pub use answerer::{Answerer, AnswerOptions};
pub use feedback::{FeedbackRecord, FeedbackSink, NullFeedbackSink};
pub use history::{ConversationHistory, ConversationTurn};
pub use policy::PolicyFilter;
pub use types::AnswerResult;
