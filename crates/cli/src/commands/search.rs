//! Search command handler.
//!
//! Case-insensitive substring search across prompt name, description, and
//! content, with each hit classified by the field it matched.

use super::{build_store, print_json};
use clap::Args;
use promptd_core::{AppConfig, AppResult};

/// Search prompts by name, description, or content
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Search query
    pub query: String,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let store = build_store(config)?;
        let results = store.search_prompts(&self.query).await?;
        let total = results.len();

        let output = serde_json::json!({
            "query": self.query,
            "results": results,
            "total": total,
        });

        print_json(&output)
    }
}
