//! Command handlers for the promptd CLI.
//!
//! This module organizes all CLI commands into separate submodules and
//! provides the shared store construction and JSON output helpers.

pub mod category;
pub mod compose;
pub mod get;
pub mod list;
pub mod refresh;
pub mod search;

// Re-export command types for convenience
pub use category::{CategoriesCommand, CategoryCommand};
pub use compose::ComposeCommand;
pub use get::GetCommand;
pub use list::ListCommand;
pub use refresh::RefreshCommand;
pub use search::SearchCommand;

use promptd_core::{AppConfig, AppError, AppResult};
use promptd_notion::NotionClient;
use promptd_store::{HandlingMode, PromptStore};
use std::sync::Arc;
use std::time::Duration;

/// Build a prompt store from the validated configuration.
pub(crate) fn build_store(config: &AppConfig) -> AppResult<PromptStore> {
    let token = config
        .notion_token
        .clone()
        .ok_or_else(|| AppError::Config("Notion API token is not configured".to_string()))?;
    let database_id = config
        .database_id
        .clone()
        .ok_or_else(|| AppError::Config("Notion database id is not configured".to_string()))?;

    let client = match &config.notion_base_url {
        Some(base_url) => NotionClient::with_base_url(base_url, token, database_id),
        None => NotionClient::new(token, database_id),
    };

    let mode: HandlingMode = config.handling_mode.parse()?;

    Ok(PromptStore::with_settings(
        Arc::new(client),
        Duration::from_millis(config.cache_ttl_ms),
        mode,
    ))
}

/// Print a JSON value to stdout, pretty-printed.
pub(crate) fn print_json(value: &serde_json::Value) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A structured not-found payload.
pub(crate) fn not_found(message: String) -> serde_json::Value {
    serde_json::json!({
        "found": false,
        "message": message,
    })
}
