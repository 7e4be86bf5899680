//! Answer outcome types.

/// The text returned to the user for one question.
///
/// Exactly one of three outcomes per question, never a blend:
/// a generated answer, the configured policy refusal, or the configured
/// no-context fallback. The latter two carry the configured strings
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerResult {
    /// Text generated by the model, trimmed but otherwise verbatim
    Generated(String),

    /// The fixed refusal string for disallowed question intent
    PolicyRefusal(String),

    /// The fixed fallback string when no chunk met the threshold
    NoContextFallback(String),
}

impl AnswerResult {
    /// The user-visible answer text.
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::PolicyRefusal(text) => text,
            Self::NoContextFallback(text) => text,
        }
    }

    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::PolicyRefusal(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::NoContextFallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_accessor() {
        assert_eq!(AnswerResult::Generated("hi".to_string()).text(), "hi");
        assert!(AnswerResult::PolicyRefusal("no".to_string()).is_refusal());
        assert!(AnswerResult::NoContextFallback("sorry".to_string()).is_fallback());
    }
}
