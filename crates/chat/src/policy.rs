//! Rule-based policy filter for disallowed question intent.
//!
//! Trusting the prompt instruction alone makes the refusal contract
//! probabilistic. This filter intercepts ranking/comparison/donation-advice
//! questions before any retrieval or generation happens, so the refusal
//! guarantee is deterministic. The prompt instruction stays in place as a
//! second layer.

/// Outcome of classifying a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Whether the question may proceed to retrieval and generation
    pub allowed: bool,

    /// The pattern that triggered a refusal, for logging
    pub matched_pattern: Option<String>,
}

/// Classifies whether a question asks for ranking, comparison or donation
/// advice among grantees. Patterns are configuration data.
#[derive(Debug, Clone)]
pub struct PolicyFilter {
    patterns: Vec<String>,
}

impl PolicyFilter {
    /// Create a filter from lowercase phrase patterns.
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Classify a question.
    ///
    /// Single-word patterns match whole words only, so "rank" does not fire
    /// inside "Frankly" and "compare" does not fire inside "compared".
    /// Multi-word phrases match as substrings of the lowered question.
    pub fn classify(&self, question: &str) -> PolicyDecision {
        let lowered = question.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        for pattern in &self.patterns {
            let matched = if pattern.contains(char::is_whitespace) {
                lowered.contains(pattern.as_str())
            } else {
                words.iter().any(|word| word == pattern)
            };

            if matched {
                tracing::info!("Question matched disallowed-intent pattern '{}'", pattern);
                return PolicyDecision {
                    allowed: false,
                    matched_pattern: Some(pattern.clone()),
                };
            }
        }

        PolicyDecision {
            allowed: true,
            matched_pattern: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantscope_prompt::PromptConfig;

    fn default_filter() -> PolicyFilter {
        PolicyFilter::new(PromptConfig::default().policy_patterns)
    }

    #[test]
    fn test_ranking_question_disallowed() {
        let filter = default_filter();
        let decision = filter.classify("Rank the grantees by impact");
        assert!(!decision.allowed);
        assert!(decision.matched_pattern.is_some());
    }

    #[test]
    fn test_comparison_question_disallowed() {
        let filter = default_filter();
        assert!(!filter.classify("Compare work of grantee A versus grantee B").allowed);
        assert!(!filter.classify("Compare grantee A and grantee B").allowed);
    }

    #[test]
    fn test_donation_advice_disallowed() {
        let filter = default_filter();
        assert!(!filter.classify("Who should I donate to?").allowed);
    }

    #[test]
    fn test_impact_ranking_disallowed() {
        let filter = default_filter();
        assert!(!filter
            .classify("Which grantee had the most impact on the community?")
            .allowed);
    }

    #[test]
    fn test_factual_question_allowed() {
        let filter = default_filter();
        let decision = filter.classify("What is Project Alpha working on?");
        assert!(decision.allowed);
        assert!(decision.matched_pattern.is_none());
    }

    #[test]
    fn test_pattern_inside_longer_word_allowed() {
        // "rank" must not fire inside "Frankly"
        let filter = default_filter();
        let decision = filter.classify("What is the Frankly project working on?");
        assert!(decision.allowed);
        assert!(decision.matched_pattern.is_none());
    }

    #[test]
    fn test_inflected_form_allowed() {
        // "compare" must not fire inside "compared"
        let filter = default_filter();
        let decision = filter.classify("How has the budget changed compared to last round?");
        assert!(decision.allowed);
        assert!(decision.matched_pattern.is_none());
    }

    #[test]
    fn test_vs_as_whole_word_disallowed() {
        let filter = default_filter();
        assert!(!filter.classify("Grantee A vs grantee B?").allowed);
        // "vs" inside another word does not fire
        assert!(filter.classify("What does the Avs project do?").allowed);
    }

    #[test]
    fn test_follow_up_question_allowed() {
        let filter = default_filter();
        assert!(filter.classify("What about its funding goals?").allowed);
    }

    #[test]
    fn test_case_insensitive() {
        let filter = default_filter();
        assert!(!filter.classify("RANK THE GRANTEES").allowed);
    }
}
