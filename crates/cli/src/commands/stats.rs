//! Stats command handler.
//!
//! Displays statistics about the loaded index artifact.

use clap::Args;
use grantscope_core::{config::AppConfig, AppError, AppResult};
use grantscope_retrieval::{GrantIndex, VectorIndex};

/// Show index statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let index = GrantIndex::load(&config.index_path)?;
        let stats = index.stats();

        if self.json {
            let output = serde_json::json!({
                "index": config.index_path,
                "chunks": stats.chunks_count,
                "sources": stats.sources_count,
                "dimensions": stats.dimensions,
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("Index: {}", config.index_path.display());
            println!("Chunks: {}", stats.chunks_count);
            println!("Sources: {}", stats.sources_count);
            println!("Dimensions: {}", stats.dimensions);
        }

        Ok(())
    }
}
