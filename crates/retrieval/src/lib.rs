//! Retrieval layer for GrantScope.
//!
//! Provides query-time similarity search over a persisted, read-only index
//! of grant project descriptions. The index artifact is built offline and
//! loaded once at startup; this crate never writes to it.

pub mod embeddings;
pub mod index;
pub mod types;

// Re-export commonly used types
pub use embeddings::{create_embedding_provider, EmbeddingProvider};
pub use index::{GrantIndex, VectorIndex};
pub use types::{GrantChunk, IndexStats, ScoredChunk};
