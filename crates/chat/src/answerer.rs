//! Retrieval-augmented answering orchestration.
//!
//! One question, one model call, one answer. The answerer reads the
//! per-session history, retrieves context under the similarity threshold,
//! assembles the prompt and appends the completed turn. A backend failure
//! surfaces as an error without touching the history, so the user can
//! retry the same question.

use crate::history::ConversationHistory;
use crate::policy::PolicyFilter;
use crate::types::AnswerResult;
use grantscope_core::{AppError, AppResult};
use grantscope_llm::{LlmClient, LlmRequest};
use grantscope_prompt::{build_prompt, PromptConfig};
use grantscope_retrieval::{EmbeddingProvider, VectorIndex};
use std::sync::Arc;

/// Tuning options for the answerer.
#[derive(Debug, Clone)]
pub struct AnswerOptions {
    /// Generation model identifier
    pub model: String,

    /// Sampling temperature (low favors factual grounding)
    pub temperature: f32,

    /// Maximum tokens to generate per answer
    pub max_tokens: Option<u32>,

    /// Number of nearest chunks requested before thresholding
    pub top_k: usize,

    /// Minimum similarity score for a chunk to enter the context block
    pub score_threshold: f32,

    /// Cap on prior turns replayed into the prompt (`None` = all)
    pub max_history_turns: Option<usize>,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-16k".to_string(),
            temperature: 0.0,
            max_tokens: None,
            top_k: 4,
            score_threshold: 0.6,
            max_history_turns: None,
        }
    }
}

/// The conversational answering core.
///
/// Holds the external collaborators (embedding backend, read-only index,
/// LLM client) and the prompt configuration. Session state stays outside:
/// `answer` takes the history by mutable reference, which also rules out
/// concurrent in-flight generation over the same session.
pub struct Answerer {
    llm: Arc<dyn LlmClient>,
    embeddings: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    prompt: PromptConfig,
    policy: PolicyFilter,
    options: AnswerOptions,
}

impl Answerer {
    /// Create an answerer over the given collaborators.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        embeddings: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        prompt: PromptConfig,
        options: AnswerOptions,
    ) -> Self {
        let policy = PolicyFilter::new(prompt.policy_patterns.clone());
        Self {
            llm,
            embeddings,
            index,
            prompt,
            policy,
            options,
        }
    }

    /// The model identifier answers are generated with.
    pub fn model(&self) -> &str {
        &self.options.model
    }

    /// Answer one question, appending the completed turn to `history`.
    ///
    /// Exactly one of three outcomes: a generated answer, the configured
    /// policy refusal, or the configured no-context fallback. Backend
    /// failures (`Retrieval`, `Generation`) are returned as errors and
    /// leave the history unchanged.
    pub async fn answer(
        &self,
        question: &str,
        history: &mut ConversationHistory,
    ) -> AppResult<AnswerResult> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Other("Question must not be empty".to_string()));
        }

        tracing::info!("Answering question: {}", question);

        // Policy gate runs before any backend call: disallowed intents get
        // the fixed refusal and disclose no grantee information.
        let decision = self.policy.classify(question);
        if !decision.allowed {
            let result = AnswerResult::PolicyRefusal(self.prompt.policy_refusal.clone());
            history.push(question, result.text());
            return Ok(result);
        }

        let query_embedding = self.embeddings.embed(question).await?;

        let chunks = self.index.similarity_search(
            &query_embedding,
            self.options.top_k,
            self.options.score_threshold,
        )?;

        // Empty context is a normal outcome: answer with the fixed
        // fallback instead of letting the model guess.
        if chunks.is_empty() {
            tracing::info!(
                "No chunk met the {:.2} threshold; returning fallback",
                self.options.score_threshold
            );
            let result = AnswerResult::NoContextFallback(self.prompt.no_context_fallback.clone());
            history.push(question, result.text());
            return Ok(result);
        }

        tracing::debug!(
            "Using {} context chunks (top score {:.3})",
            chunks.len(),
            chunks.first().map(|c| c.score).unwrap_or(0.0)
        );

        let replayed = history.replay(self.options.max_history_turns);
        let prompt_text = build_prompt(&self.prompt, &chunks, &replayed, question)?;

        let mut request =
            LlmRequest::new(prompt_text, &self.options.model).with_temperature(self.options.temperature);
        if let Some(max_tokens) = self.options.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        // Single call, no retry: a failure here surfaces as an error and
        // must never degrade into refusal or fallback text.
        let response = self.llm.complete(&request).await?;

        let answer = response.content.trim().to_string();
        history.push(question, answer.as_str());

        Ok(AnswerResult::Generated(answer))
    }
}
