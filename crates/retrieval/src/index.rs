//! Read-only vector index over grant description chunks.
//!
//! The persisted artifact is a SQLite database produced by the offline
//! indexing pipeline (out of scope here). It is loaded fully into memory
//! at startup and never written to: query-time search is pure cosine
//! similarity over the loaded vectors.

use crate::types::{GrantChunk, IndexStats, ScoredChunk};
use grantscope_core::{AppError, AppResult};
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;

/// Trait for similarity-searchable vector stores.
///
/// Results are ordered by descending similarity score; ties keep the
/// original index order (stable). A chunk scoring exactly at the threshold
/// is included. An empty result set is a normal outcome, not an error.
pub trait VectorIndex: Send + Sync {
    /// Search for the top-k chunks scoring at or above `score_threshold`.
    fn similarity_search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        score_threshold: f32,
    ) -> AppResult<Vec<ScoredChunk>>;

    /// Get statistics about the index.
    fn stats(&self) -> IndexStats;
}

/// In-memory index loaded from a persisted SQLite artifact.
pub struct GrantIndex {
    chunks: Vec<GrantChunk>,
    embeddings: Vec<Vec<f32>>,
    sources_count: u32,
    dimensions: usize,
}

impl GrantIndex {
    /// Load the index artifact from `path`.
    ///
    /// Expects a `chunks` table with columns
    /// `(id, source_id, position, text, embedding)` where `embedding` is a
    /// blob of little-endian f32 values. Fails with `AppError::Retrieval`
    /// if the artifact is missing or malformed.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Retrieval(format!(
                "Index artifact not found at {:?}. The index is built offline and must exist before startup.",
                path
            )));
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Retrieval(format!("Failed to open index: {}", e)))?;

        Self::from_connection(&conn)
    }

    fn from_connection(conn: &Connection) -> AppResult<Self> {
        let mut stmt = conn
            .prepare(
                "SELECT id, source_id, position, text, embedding FROM chunks ORDER BY rowid",
            )
            .map_err(|e| AppError::Retrieval(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let embedding_bytes: Vec<u8> = row.get(4)?;
                Ok((
                    GrantChunk {
                        id: row.get(0)?,
                        source_id: row.get(1)?,
                        position: row.get::<_, i64>(2)? as u32,
                        text: row.get(3)?,
                    },
                    embedding_bytes,
                ))
            })
            .map_err(|e| AppError::Retrieval(format!("Failed to query chunks: {}", e)))?;

        let mut chunks = Vec::new();
        let mut embeddings = Vec::new();

        for row in rows {
            let (chunk, embedding_bytes) =
                row.map_err(|e| AppError::Retrieval(format!("Failed to read chunk: {}", e)))?;
            let embedding = bytes_to_embedding(&embedding_bytes)?;
            chunks.push(chunk);
            embeddings.push(embedding);
        }

        let dimensions = embeddings.first().map(|e| e.len()).unwrap_or(0);

        // All stored vectors must share one dimensionality
        if embeddings.iter().any(|e| e.len() != dimensions) {
            return Err(AppError::Retrieval(
                "Index contains embeddings of mixed dimensionality".to_string(),
            ));
        }

        let sources: HashSet<&str> = chunks.iter().map(|c| c.source_id.as_str()).collect();
        let sources_count = sources.len() as u32;

        tracing::info!(
            "Loaded index: {} chunks from {} sources, dimension {}",
            chunks.len(),
            sources_count,
            dimensions
        );

        Ok(Self {
            chunks,
            embeddings,
            sources_count,
            dimensions,
        })
    }
}

impl VectorIndex for GrantIndex {
    fn similarity_search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        score_threshold: f32,
    ) -> AppResult<Vec<ScoredChunk>> {
        let mut results: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(self.embeddings.iter())
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .filter(|scored| scored.score >= score_threshold)
            .collect();

        // Stable sort: ties keep original index order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(top_k);

        tracing::debug!(
            "Retrieved {} chunks at or above threshold {:.2} (requested top-{})",
            results.len(),
            score_threshold,
            top_k
        );

        Ok(results)
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            chunks_count: self.chunks.len() as u32,
            sources_count: self.sources_count,
            dimensions: self.dimensions,
        }
    }
}

/// Convert bytes back to an embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Retrieval(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    let mut embedding = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        embedding.push(value);
    }

    Ok(embedding)
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
