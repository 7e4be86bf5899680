//! Prompt configuration types.

use grantscope_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prompt configuration, loadable from YAML.
///
/// The two fixed strings (`policy_refusal`, `no_context_fallback`) are
/// contract-level data: whenever either branch fires, the returned answer
/// is byte-identical to the configured text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Handlebars template for the generation prompt.
    ///
    /// Available variables: `context`, `history`, `question`, `refusal`,
    /// `fallback`.
    pub template: String,

    /// Fixed text returned when the question intent is disallowed
    /// (ranking/comparison/donation advice)
    #[serde(rename = "policyRefusal")]
    pub policy_refusal: String,

    /// Fixed text returned when no chunk meets the similarity threshold
    #[serde(rename = "noContextFallback")]
    pub no_context_fallback: String,

    /// Lowercase phrases that mark a question as disallowed intent
    #[serde(rename = "policyPatterns", default = "default_policy_patterns")]
    pub policy_patterns: Vec<String>,

    /// Base URL for grantee reference links built from chunk source ids
    #[serde(rename = "explorerBaseUrl", skip_serializing_if = "Option::is_none")]
    pub explorer_base_url: Option<String>,
}

fn default_policy_patterns() -> Vec<String> {
    [
        "rank",
        "ranking",
        "sort the grantees",
        "compare",
        "comparison",
        "versus",
        "vs",
        "who should i donate",
        "which grantee should",
        "most impact",
        "best grantee",
        "top grantee",
        "recommend",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

const DEFAULT_TEMPLATE: &str = r#"We have provided context information below.
---------------------
{{context}}
---------------------
Do not respond to questions that ask to sort or rank grantees. Do not respond to questions that ask to compare grantees. Similarly, do not respond to questions asking for advice on which grantee to donate contributions. For such questions, do not share any grantee information and just say: "{{refusal}}"
If the answer is unavailable in the context information above, respond: {{fallback}}
{{#if history}}Below is the conversation so far:
{{history}}
{{/if}}Given this information, please answer the following question. Include reference links when sharing grantee information. Respond in table format when there are more than 2 grantees in the response.
Question: {{question}}"#;

const DEFAULT_POLICY_REFUSAL: &str = "Dear human, I am told not to influence you with my biases \
for such queries. The burden of choosing the public greats and saving the future of your kind \
lies on you. Choose well!";

const DEFAULT_NO_CONTEXT_FALLBACK: &str = "Sorry! I don't have an answer for this.";

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            policy_refusal: DEFAULT_POLICY_REFUSAL.to_string(),
            no_context_fallback: DEFAULT_NO_CONTEXT_FALLBACK.to_string(),
            policy_patterns: default_policy_patterns(),
            explorer_base_url: None,
        }
    }
}

impl PromptConfig {
    /// Load a prompt configuration from a YAML file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
        })?;

        let config: PromptConfig = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Prompt(format!("Failed to parse prompt file {:?}: {}", path, e))
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_fixed_strings() {
        let config = PromptConfig::default();
        assert!(config.policy_refusal.starts_with("Dear human"));
        assert_eq!(
            config.no_context_fallback,
            "Sorry! I don't have an answer for this."
        );
        assert!(!config.policy_patterns.is_empty());
    }

    #[test]
    fn test_template_references_variables() {
        let config = PromptConfig::default();
        for var in ["{{context}}", "{{question}}", "{{refusal}}", "{{fallback}}"] {
            assert!(config.template.contains(var), "missing {}", var);
        }
    }

    #[test]
    fn test_load_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.yaml");
        std::fs::write(
            &path,
            r#"
template: "Context: {{context}} Question: {{question}}"
policyRefusal: "No ranking answers."
noContextFallback: "Nothing found."
explorerBaseUrl: "https://explorer.example.org/round/1"
"#,
        )
        .unwrap();

        let config = PromptConfig::load(&path).unwrap();
        assert_eq!(config.policy_refusal, "No ranking answers.");
        assert_eq!(config.no_context_fallback, "Nothing found.");
        assert_eq!(
            config.explorer_base_url.as_deref(),
            Some("https://explorer.example.org/round/1")
        );
        // Patterns fall back to defaults when omitted
        assert!(!config.policy_patterns.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = PromptConfig::load(Path::new("/nonexistent/prompt.yaml"));
        assert!(result.is_err());
    }
}
