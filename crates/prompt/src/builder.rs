//! Prompt builder: renders the template with context, history and question.

use crate::types::PromptConfig;
use grantscope_core::{AppError, AppResult};
use grantscope_retrieval::ScoredChunk;
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build the generation prompt for one question.
///
/// The context block lists the qualifying chunks in the order retrieval
/// returned them (descending similarity, stable ties). History is replayed
/// chronologically so follow-up references ("what about its funding?")
/// resolve against earlier turns. The caller decides how much history to
/// pass; this function renders exactly what it is given.
pub fn build_prompt(
    config: &PromptConfig,
    chunks: &[ScoredChunk],
    history: &[(String, String)],
    question: &str,
) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("context".to_string(), format_context(config, chunks));
    variables.insert("history".to_string(), format_history(history));
    variables.insert("question".to_string(), question.to_string());
    variables.insert("refusal".to_string(), config.policy_refusal.clone());
    variables.insert("fallback".to_string(), config.no_context_fallback.clone());

    render_template(&config.template, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

/// Concatenate qualifying chunks into the context block.
///
/// Each chunk is followed by a reference link derived from its source id,
/// so the generator can include explorer links in the answer.
fn format_context(config: &PromptConfig, chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|scored| {
            let reference = match &config.explorer_base_url {
                Some(base) => format!("{}/{}", base.trim_end_matches('/'), scored.chunk.source_id),
                None => scored.chunk.source_id.clone(),
            };
            format!("{}\n(Reference: {})", scored.chunk.text.trim(), reference)
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Format prior turns chronologically as Human/Assistant lines.
fn format_history(history: &[(String, String)]) -> String {
    history
        .iter()
        .map(|(question, answer)| format!("Human: {}\nAssistant: {}", question, answer))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantscope_retrieval::GrantChunk;

    fn scored(id: &str, source_id: &str, text: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: GrantChunk {
                id: id.to_string(),
                source_id: source_id.to_string(),
                position: 0,
                text: text.to_string(),
            },
            score,
        }
    }

    #[test]
    fn test_build_prompt_contains_all_sections() {
        let config = PromptConfig::default();
        let chunks = vec![scored("c1", "app-1", "Project Alpha builds tooling.", 0.9)];
        let history = vec![(
            "What is Project Alpha?".to_string(),
            "Alpha builds tooling.".to_string(),
        )];

        let prompt = build_prompt(&config, &chunks, &history, "What about its funding?").unwrap();

        assert!(prompt.contains("Project Alpha builds tooling."));
        assert!(prompt.contains("Human: What is Project Alpha?"));
        assert!(prompt.contains("Assistant: Alpha builds tooling."));
        assert!(prompt.contains("Question: What about its funding?"));
        assert!(prompt.contains(&config.policy_refusal));
        assert!(prompt.contains(&config.no_context_fallback));
    }

    #[test]
    fn test_history_replayed_in_original_order() {
        let config = PromptConfig::default();
        let history = vec![
            ("What is project X?".to_string(), "X does Y".to_string()),
            ("Who runs it?".to_string(), "A small team".to_string()),
        ];

        let prompt = build_prompt(&config, &[], &history, "What about its funding?").unwrap();

        let first = prompt.find("Human: What is project X?").unwrap();
        let second = prompt.find("Human: Who runs it?").unwrap();
        let question = prompt.find("Question: What about its funding?").unwrap();
        assert!(first < second);
        assert!(second < question);
    }

    #[test]
    fn test_empty_history_omits_conversation_block() {
        let config = PromptConfig::default();
        let prompt = build_prompt(&config, &[], &[], "What is project X?").unwrap();

        assert!(!prompt.contains("conversation so far"));
        assert!(prompt.contains("Question: What is project X?"));
    }

    #[test]
    fn test_context_ordering_preserved() {
        let config = PromptConfig::default();
        let chunks = vec![
            scored("c1", "app-1", "Strongest match.", 0.9),
            scored("c2", "app-2", "Weaker match.", 0.7),
        ];

        let prompt = build_prompt(&config, &chunks, &[], "Question?").unwrap();
        let first = prompt.find("Strongest match.").unwrap();
        let second = prompt.find("Weaker match.").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_explorer_reference_links() {
        let mut config = PromptConfig::default();
        config.explorer_base_url = Some("https://explorer.example.org/round/2/".to_string());
        let chunks = vec![scored("c1", "app-42", "Some grantee text.", 0.8)];

        let prompt = build_prompt(&config, &chunks, &[], "Question?").unwrap();
        assert!(prompt.contains("(Reference: https://explorer.example.org/round/2/app-42)"));
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Question: {{missing}}", &vars);
        // Handlebars renders missing variables as empty string
        assert!(result.is_ok());
    }
}
