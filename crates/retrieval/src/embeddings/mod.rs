//! Embedding providers for query-time retrieval.

pub mod provider;
pub mod providers;

pub use provider::{create_embedding_provider, EmbeddingProvider};
