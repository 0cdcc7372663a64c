//! Get command handler.
//!
//! Fetches one prompt by exact name or by upstream id. A miss is a
//! structured "not found" payload, never a failure.

use super::{build_store, not_found, print_json};
use clap::Args;
use promptd_core::{AppConfig, AppError, AppResult};

/// Fetch a single prompt by name or id
#[derive(Args, Debug)]
pub struct GetCommand {
    /// Prompt name (exact, case-sensitive)
    #[arg(long, conflicts_with = "id")]
    pub name: Option<String>,

    /// Upstream prompt id
    #[arg(long)]
    pub id: Option<String>,
}

impl GetCommand {
    /// Execute the get command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing get command");

        let store = build_store(config)?;

        let (prompt, label) = if let Some(name) = &self.name {
            (store.find_prompt_by_name(name).await?, name.clone())
        } else if let Some(id) = &self.id {
            (store.find_prompt_by_id(id).await?, id.clone())
        } else {
            return Err(AppError::Config(
                "Provide either --name or --id".to_string(),
            ));
        };

        let output = match prompt {
            Some(prompt) => serde_json::json!({
                "found": true,
                "prompt": prompt,
            }),
            None => not_found(format!("Prompt not found: {}", label)),
        };

        print_json(&output)
    }
}
