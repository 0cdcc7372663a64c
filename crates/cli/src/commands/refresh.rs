//! Refresh command handler.
//!
//! Forces a full cache refresh regardless of expiry.

use super::{build_store, print_json};
use clap::Args;
use promptd_core::{AppConfig, AppResult};

/// Force a cache refresh from the upstream store
#[derive(Args, Debug)]
pub struct RefreshCommand {}

impl RefreshCommand {
    /// Execute the refresh command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing refresh command");

        let store = build_store(config)?;
        let prompts = store.refresh_cache().await?;
        let fetched_at = store.last_fetched_at().await;

        let output = serde_json::json!({
            "refreshed": true,
            "total": prompts.len(),
            "fetchedAt": fetched_at,
        });

        print_json(&output)
    }
}
