//! Ask command handler.
//!
//! Answers a single question against the indexed grant round and exits.

use clap::Args;
use grantscope_chat::{ConversationHistory, FeedbackSink, NullFeedbackSink};
use grantscope_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Ask a single question and exit
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self.get_question()?;

        let answerer = super::build_answerer(config)?;

        // One-shot session: fresh history, discarded on exit
        let mut history = ConversationHistory::new();
        let result = answerer.answer(&question, &mut history).await?;

        let feedback = NullFeedbackSink;
        let record = feedback.log_prompt(&question, result.text(), answerer.model())?;
        tracing::debug!("Logged prompt record {}", record.id);

        if self.json {
            let output = serde_json::json!({
                "answer": result.text(),
                "kind": match &result {
                    r if r.is_refusal() => "policyRefusal",
                    r if r.is_fallback() => "noContextFallback",
                    _ => "generated",
                },
                "model": answerer.model(),
                "provider": config.provider,
                "recordId": record.id,
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", result.text());
        }

        Ok(())
    }

    /// Get the question text from the positional argument or `--file`.
    ///
    /// A file that cannot be read is an error in its own right, not a
    /// missing question.
    fn get_question(&self) -> AppResult<String> {
        if let Some(question) = &self.question {
            return Ok(question.clone());
        }

        if let Some(path) = &self.file {
            return Ok(std::fs::read_to_string(path)?);
        }

        Err(AppError::Config("No question provided".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(question: Option<&str>, file: Option<&str>) -> AskCommand {
        AskCommand {
            question: question.map(str::to_string),
            file: file.map(PathBuf::from),
            json: false,
        }
    }

    #[test]
    fn test_question_from_positional_argument() {
        let cmd = command(Some("What is project X?"), None);
        assert_eq!(cmd.get_question().unwrap(), "What is project X?");
    }

    #[test]
    fn test_unreadable_file_surfaces_io_error() {
        let cmd = command(None, Some("/nonexistent/question.txt"));
        assert!(matches!(cmd.get_question(), Err(AppError::Io(_))));
    }

    #[test]
    fn test_no_question_is_config_error() {
        let cmd = command(None, None);
        assert!(matches!(cmd.get_question(), Err(AppError::Config(_))));
    }
}
