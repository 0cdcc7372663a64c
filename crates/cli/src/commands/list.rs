//! List command handler.
//!
//! Lists all prompts as content-free projections, optionally paginated.

use super::{build_store, print_json};
use clap::Args;
use promptd_core::{AppConfig, AppResult};

/// List prompts (optionally paginated)
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Page number (1-based); enables pagination
    #[arg(long)]
    pub page: Option<usize>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl ListCommand {
    /// Execute the list command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing list command");

        let store = build_store(config)?;

        if self.page.is_some() || self.page_size.is_some() {
            let page = self.page.unwrap_or(1);
            let page_size = self.page_size.unwrap_or(10);

            let result = store.get_paginated_prompts(page, page_size).await?;
            return print_json(&serde_json::to_value(&result)?);
        }

        let prompts = store.get_prompt_list().await?;
        let total = prompts.len();
        let output = serde_json::json!({
            "prompts": prompts,
            "total": total,
        });

        print_json(&output)
    }
}
