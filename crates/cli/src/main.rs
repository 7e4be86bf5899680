//! GrantScope CLI
//!
//! Main entry point for the grantscope command-line tool.
//! Conversational question answering over an indexed grant round.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, StatsCommand};
use grantscope_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// GrantScope CLI - conversational QA over grant project descriptions
#[derive(Parser, Debug)]
#[command(name = "grantscope")]
#[command(about = "Conversational QA over grant project descriptions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the index artifact
    #[arg(short, long, global = true, env = "GRANTSCOPE_INDEX")]
    index: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "GRANTSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (openai, ollama)
    #[arg(short, long, global = true, env = "GRANTSCOPE_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "GRANTSCOPE_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive chat session over the indexed grant round
    Chat(ChatCommand),

    /// Ask a single question and exit
    Ask(AskCommand),

    /// Show index statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.index,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("GrantScope CLI starting");
    tracing::debug!("Index: {:?}", config.index_path);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
