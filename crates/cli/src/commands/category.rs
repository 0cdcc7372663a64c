//! Category command handlers.
//!
//! `category` filters prompts by a category label; `categories` lists every
//! known label. The match policy (substring by default, `--exact` for
//! equality) is explicit because the two behaviors are both legitimate.

use super::{build_store, print_json};
use clap::Args;
use promptd_core::{AppConfig, AppResult};
use promptd_store::{CategoryMatch, PromptInfo};

/// Filter prompts by category label
#[derive(Args, Debug)]
pub struct CategoryCommand {
    /// Category label ("all" or empty returns every prompt)
    pub category: String,

    /// Require exact label equality instead of substring inclusion
    #[arg(long)]
    pub exact: bool,
}

impl CategoryCommand {
    /// Execute the category command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing category command");

        let policy = if self.exact {
            CategoryMatch::Exact
        } else {
            CategoryMatch::Substring
        };

        let store = build_store(config)?;
        let prompts = store.get_prompts_by_category(&self.category, policy).await?;

        let infos: Vec<PromptInfo> = prompts.iter().map(PromptInfo::from).collect();
        let total = infos.len();

        let output = serde_json::json!({
            "category": self.category,
            "match": if self.exact { "exact" } else { "substring" },
            "prompts": infos,
            "total": total,
        });

        print_json(&output)
    }
}

/// List every known category label
#[derive(Args, Debug)]
pub struct CategoriesCommand {}

impl CategoriesCommand {
    /// Execute the categories command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing categories command");

        let store = build_store(config)?;
        let categories = store.list_categories().await?;
        let total = categories.len();

        let output = serde_json::json!({
            "categories": categories,
            "total": total,
        });

        print_json(&output)
    }
}
