//! Per-session conversation state.
//!
//! History is an explicit object owned by the session and passed by
//! mutable reference into the answerer. One instance per session, no
//! process-wide singletons, not persisted across sessions.

/// One (question, answer) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

/// Ordered, append-only sequence of conversation turns.
///
/// Grows by exactly one turn per successfully completed question cycle.
/// A cycle that fails before producing an answer must not append.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    /// Create an empty history for a new session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the newest completed turn.
    pub fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ConversationTurn {
            question: question.into(),
            answer: answer.into(),
        });
    }

    /// Number of completed turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns in chronological order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The most recent `limit` turns (all turns when `limit` is `None`),
    /// as (question, answer) pairs in chronological order.
    pub fn replay(&self, limit: Option<usize>) -> Vec<(String, String)> {
        let start = match limit {
            Some(limit) => self.turns.len().saturating_sub(limit),
            None => 0,
        };

        self.turns[start..]
            .iter()
            .map(|turn| (turn.question.clone(), turn.answer.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_is_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut history = ConversationHistory::new();
        history.push("What is project X?", "X does Y");
        history.push("What about its funding?", "It seeks retroactive funding");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].question, "What is project X?");
        assert_eq!(history.turns()[1].answer, "It seeks retroactive funding");
    }

    #[test]
    fn test_replay_full_history() {
        let mut history = ConversationHistory::new();
        history.push("q1", "a1");
        history.push("q2", "a2");

        let pairs = history.replay(None);
        assert_eq!(
            pairs,
            vec![
                ("q1".to_string(), "a1".to_string()),
                ("q2".to_string(), "a2".to_string()),
            ]
        );
    }

    #[test]
    fn test_replay_with_cap_keeps_most_recent() {
        let mut history = ConversationHistory::new();
        history.push("q1", "a1");
        history.push("q2", "a2");
        history.push("q3", "a3");

        let pairs = history.replay(Some(2));
        assert_eq!(
            pairs,
            vec![
                ("q2".to_string(), "a2".to_string()),
                ("q3".to_string(), "a3".to_string()),
            ]
        );
    }

    #[test]
    fn test_replay_cap_larger_than_history() {
        let mut history = ConversationHistory::new();
        history.push("q1", "a1");

        let pairs = history.replay(Some(10));
        assert_eq!(pairs.len(), 1);
    }
}
