//! Retrieval type definitions.

use serde::{Deserialize, Serialize};

/// A passage of a grant project description, as stored in the index.
///
/// Immutable once retrieved. The `source_id` identifies the grantee's
/// application and is used to build an explorer reference link when the
/// chunk enters the context block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantChunk {
    /// Unique chunk identifier
    pub id: String,

    /// Source application identifier
    pub source_id: String,

    /// Position within the source document
    pub position: u32,

    /// Text content
    pub text: String,
}

/// A chunk paired with its similarity score against a query.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: GrantChunk,
    pub score: f32,
}

/// Statistics about a loaded index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of chunks in the index
    pub chunks_count: u32,

    /// Number of distinct source documents
    pub sources_count: u32,

    /// Embedding vector dimension
    pub dimensions: usize,
}
