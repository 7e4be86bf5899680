//! Chat command handler.
//!
//! Interactive question-answering loop with per-session conversation
//! history. One question is in flight at a time; the session ends on
//! "exit", "quit" or end of input.

use clap::Args;
use grantscope_chat::{ConversationHistory, FeedbackSink, NullFeedbackSink};
use grantscope_core::{config::AppConfig, AppResult};
use std::io::{BufRead, Write};

const WELCOME: &str = "Welcome to GrantScope! Ask me anything about the grantees in this round. \
Type 'exit' to leave.";

/// Interactive chat session over the indexed grant round
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Suppress the welcome banner
    #[arg(short, long)]
    pub quiet: bool,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let answerer = super::build_answerer(config)?;
        let feedback = NullFeedbackSink;

        // Session state lives here: one history per chat session, dropped
        // when the session ends
        let mut history = ConversationHistory::new();

        if !self.quiet {
            println!("{}", WELCOME);
            println!();
        }

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("> ");
            stdout.flush()?;

            let mut line = String::new();
            let read = stdin.lock().read_line(&mut line)?;
            if read == 0 {
                // EOF ends the session
                break;
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }

            match answerer.answer(question, &mut history).await {
                Ok(result) => {
                    println!("{}", result.text());
                    println!();

                    match feedback.log_prompt(question, result.text(), answerer.model()) {
                        Ok(record) => tracing::debug!("Logged prompt record {}", record.id),
                        Err(e) => tracing::warn!("Failed to log prompt for feedback: {}", e),
                    }
                }
                Err(e) => {
                    // Backend failure: history is unchanged, the user can
                    // retry the same question. Detail goes to the log, the
                    // user gets a generic notice.
                    tracing::error!("Failed to answer question: {}", e);
                    println!("Something went wrong while answering. Please try again.");
                    println!();
                }
            }
        }

        tracing::info!("Chat session ended after {} turns", history.len());

        Ok(())
    }
}
