//! Command handlers for the GrantScope CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use stats::StatsCommand;

use grantscope_chat::{AnswerOptions, Answerer};
use grantscope_core::{config::AppConfig, AppError, AppResult};
use grantscope_llm::create_client;
use grantscope_prompt::PromptConfig;
use grantscope_retrieval::{create_embedding_provider, GrantIndex, VectorIndex};
use std::sync::Arc;
use std::time::Duration;

/// Build the answering core from the resolved configuration.
///
/// Loads the index artifact, wires up the embedding provider and LLM
/// client, and checks that the index dimensionality matches the query-time
/// embedding model before any question is answered.
pub(crate) fn build_answerer(config: &AppConfig) -> AppResult<Answerer> {
    config.validate()?;

    let timeout = Duration::from_secs(config.timeout_secs);

    let llm = create_client(
        &config.provider,
        config.endpoint.as_deref(),
        config.api_key.as_deref(),
        timeout,
    )
    .map_err(AppError::Config)?;

    let embeddings = create_embedding_provider(
        &config.embedding_provider,
        &config.embedding_model,
        config.endpoint.as_deref(),
        config.api_key.as_deref(),
        timeout,
    )?;

    tracing::info!("Loading index from {:?}", config.index_path);
    let index = GrantIndex::load(&config.index_path)?;

    let stats = index.stats();
    tracing::info!(
        "Index loaded: {} chunks from {} sources ({} dimensions)",
        stats.chunks_count,
        stats.sources_count,
        stats.dimensions
    );

    if stats.chunks_count > 0 && stats.dimensions != embeddings.dimensions() {
        return Err(AppError::Config(format!(
            "Index dimensionality ({}) does not match embedding model '{}' ({}). \
             Query embeddings must come from the model the index was built with.",
            stats.dimensions,
            embeddings.model_name(),
            embeddings.dimensions()
        )));
    }

    let prompt = match &config.prompt_file {
        Some(path) => PromptConfig::load(path)?,
        None => PromptConfig::default(),
    };

    let options = AnswerOptions {
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        top_k: config.top_k,
        score_threshold: config.score_threshold,
        max_history_turns: config.max_history_turns,
    };

    Ok(Answerer::new(llm, embeddings, Arc::new(index), prompt, options))
}
