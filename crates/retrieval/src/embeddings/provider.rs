//! Embedding provider trait and factory.

use grantscope_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Trait for embedding providers.
///
/// The exact dimensionality and model are an external contract: the query
/// embedding must come from the same model that produced the indexed
/// vectors. Backend failures surface as `AppError::Retrieval`.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "mock", "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Retrieval("No embedding returned".to_string()))
    }
}

/// Create an embedding provider by name.
pub fn create_embedding_provider(
    provider: &str,
    model: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match provider {
        "mock" => {
            let provider = super::providers::mock::MockProvider::new(384);
            Ok(Arc::new(provider))
        }

        "openai" => {
            let api_key = api_key.ok_or_else(|| {
                AppError::Retrieval("OpenAI embedding provider requires API key".to_string())
            })?;
            let provider = super::providers::openai::OpenAiEmbeddingProvider::new(
                api_key, model, endpoint, timeout,
            )?;
            Ok(Arc::new(provider))
        }

        "ollama" => {
            let provider =
                super::providers::ollama::OllamaEmbeddingProvider::new(model, endpoint, timeout)?;
            Ok(Arc::new(provider))
        }

        _ => Err(AppError::Retrieval(format!(
            "Unknown embedding provider: '{}'. Supported providers: mock, openai, ollama",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_provider() {
        let provider =
            create_embedding_provider("mock", "trigram-v1", None, None, Duration::from_secs(30))
                .unwrap();
        assert_eq!(provider.provider_name(), "mock");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_openai_requires_api_key() {
        let result = create_embedding_provider(
            "openai",
            "text-embedding-ada-002",
            None,
            None,
            Duration::from_secs(30),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_unknown_provider() {
        let result =
            create_embedding_provider("unknown", "test", None, None, Duration::from_secs(30));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider =
            create_embedding_provider("mock", "trigram-v1", None, None, Duration::from_secs(30))
                .unwrap();

        let embedding = provider.embed("grant project").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
