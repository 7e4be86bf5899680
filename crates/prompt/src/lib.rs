//! Prompt assembly for GrantScope.
//!
//! The governing prompt, the policy refusal text and the no-context
//! fallback text are configuration data, not hardcoded prose: operators
//! can change the wording without touching logic. This crate renders the
//! template with the retrieved context block, the conversation history and
//! the current question.

pub mod builder;
pub mod types;

pub use builder::build_prompt;
pub use types::PromptConfig;
