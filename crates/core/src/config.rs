//! Configuration management for GrantScope.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.grantscope/config.yaml)
//!
//! Retrieval behavior (similarity threshold, top-k), model selection and
//! the per-call timeout all live here so operators can tune them without
//! touching code.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default minimum similarity score for a retrieved chunk to qualify.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.6;

/// Default number of chunks requested from the index before thresholding.
pub const DEFAULT_TOP_K: usize = 4;

/// Default timeout for external calls (embedding and generation), seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the persisted vector index artifact (read-only at runtime)
    pub index_path: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider for generation (e.g., "openai", "ollama")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// Embedding provider (e.g., "openai", "ollama", "mock")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Optional custom endpoint for the provider
    pub endpoint: Option<String>,

    /// API key for the LLM/embedding provider
    pub api_key: Option<String>,

    /// Minimum similarity score for a chunk to enter the context block.
    /// A chunk scoring exactly at the threshold is included.
    pub score_threshold: f32,

    /// Number of nearest chunks requested before the threshold is applied
    pub top_k: usize,

    /// Sampling temperature (low favors factual grounding)
    pub temperature: f32,

    /// Maximum tokens to generate per answer
    pub max_tokens: Option<u32>,

    /// Cap on how many prior turns are replayed into the prompt.
    /// `None` replays the full history.
    pub max_history_turns: Option<usize>,

    /// Timeout for each external call, in seconds
    pub timeout_secs: u64,

    /// Optional prompt configuration file (template, refusal/fallback text)
    pub prompt_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    retrieval: Option<RetrievalConfig>,
    llm: Option<LlmConfig>,
    chat: Option<ChatConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalConfig {
    index: Option<String>,
    #[serde(rename = "scoreThreshold")]
    score_threshold: Option<f32>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
    #[serde(rename = "embeddingProvider")]
    embedding_provider: Option<String>,
    #[serde(rename = "embeddingModel")]
    embedding_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmConfig {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatConfig {
    #[serde(rename = "maxHistoryTurns")]
    max_history_turns: Option<usize>,
    #[serde(rename = "promptFile")]
    prompt_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("storage/grants.db"),
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo-16k".to_string(),
            embedding_provider: "openai".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            endpoint: None,
            api_key: None,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            temperature: 0.0,
            max_tokens: None,
            max_history_turns: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            prompt_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `GRANTSCOPE_INDEX`: Path to the index artifact
    /// - `GRANTSCOPE_CONFIG`: Path to config file
    /// - `GRANTSCOPE_PROVIDER`: LLM provider
    /// - `GRANTSCOPE_MODEL`: Generation model identifier
    /// - `GRANTSCOPE_API_KEY` / `OPENAI_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(index) = std::env::var("GRANTSCOPE_INDEX") {
            config.index_path = PathBuf::from(index);
        }

        if let Ok(config_file) = std::env::var("GRANTSCOPE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            PathBuf::from(".grantscope/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("GRANTSCOPE_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("GRANTSCOPE_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("GRANTSCOPE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(retrieval) = config_file.retrieval {
            if let Some(index) = retrieval.index {
                result.index_path = PathBuf::from(index);
            }
            if let Some(threshold) = retrieval.score_threshold {
                result.score_threshold = threshold;
            }
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
            if let Some(provider) = retrieval.embedding_provider {
                result.embedding_provider = provider;
            }
            if let Some(model) = retrieval.embedding_model {
                result.embedding_model = model;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
            if let Some(temperature) = llm.temperature {
                result.temperature = temperature;
            }
            if llm.max_tokens.is_some() {
                result.max_tokens = llm.max_tokens;
            }
            if let Some(timeout) = llm.timeout_secs {
                result.timeout_secs = timeout;
            }
        }

        if let Some(chat) = config_file.chat {
            if chat.max_history_turns.is_some() {
                result.max_history_turns = chat.max_history_turns;
            }
            if let Some(prompt_file) = chat.prompt_file {
                result.prompt_file = Some(PathBuf::from(prompt_file));
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        index: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(index) = index {
            self.index_path = index;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration for the active providers.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["openai", "ollama"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        let known_embedding_providers = ["openai", "ollama", "mock"];
        if !known_embedding_providers.contains(&self.embedding_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding_provider,
                known_embedding_providers.join(", ")
            )));
        }

        if self.provider == "openai" && self.api_key.is_none() {
            return Err(AppError::Config(
                "OpenAI provider requires an API key (set OPENAI_API_KEY)".to_string(),
            ));
        }

        if !(-1.0..=1.0).contains(&self.score_threshold) {
            return Err(AppError::Config(format!(
                "Score threshold must be within [-1.0, 1.0], got {}",
                self.score_threshold
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-3.5-turbo-16k");
        assert_eq!(config.score_threshold, DEFAULT_SCORE_THRESHOLD);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.temperature, 0.0);
        assert!(config.max_history_turns.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("/tmp/index.db")),
            None,
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.index_path, PathBuf::from("/tmp/index.db"));
        assert_eq!(overridden.provider, "ollama");
        assert_eq!(overridden.model, "llama3.2");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_openai_requires_api_key() {
        let mut config = AppConfig::default();
        config.provider = "openai".to_string();
        config.api_key = None;
        assert!(config.validate().is_err());

        config.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = AppConfig::default();
        config.provider = "ollama".to_string();
        config.score_threshold = 1.5;
        assert!(config.validate().is_err());

        config.score_threshold = 0.6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_yaml() {
        let mut config = AppConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
retrieval:
  index: /data/grants.db
  scoreThreshold: 0.7
  topK: 6
llm:
  provider: ollama
  model: llama3.2
  temperature: 0.2
chat:
  maxHistoryTurns: 20
logging:
  level: debug
"#,
        )
        .unwrap();

        let merged = config.merge_yaml(&path).unwrap();
        assert_eq!(merged.index_path, PathBuf::from("/data/grants.db"));
        assert_eq!(merged.score_threshold, 0.7);
        assert_eq!(merged.top_k, 6);
        assert_eq!(merged.provider, "ollama");
        assert_eq!(merged.temperature, 0.2);
        assert_eq!(merged.max_history_turns, Some(20));
        assert_eq!(merged.log_level, Some("debug".to_string()));
    }
}
