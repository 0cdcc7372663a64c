//! Compose command handler.
//!
//! Resolves a prompt by name, substitutes placeholders with the supplied
//! input, and wraps the result per the effective handling mode.

use super::{build_store, not_found, print_json};
use clap::Args;
use promptd_core::{AppConfig, AppResult};
use promptd_store::HandlingMode;

/// Compose a prompt template with user input
#[derive(Args, Debug)]
pub struct ComposeCommand {
    /// Prompt name (exact, case-sensitive)
    pub name: String,

    /// User input substituted for the input placeholder
    pub input: String,

    /// Handling mode override (return-only, process-locally, call-external-api)
    #[arg(long)]
    pub mode: Option<String>,
}

impl ComposeCommand {
    /// Execute the compose command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing compose command");

        let mode_override = match &self.mode {
            Some(mode) => Some(mode.parse::<HandlingMode>()?),
            None => None,
        };

        let store = build_store(config)?;
        let handled = store
            .compose_and_handle(&self.name, &self.input, mode_override)
            .await?;

        let output = match handled {
            Some(handled) => serde_json::json!({
                "found": true,
                "composed": handled,
            }),
            None => not_found(format!("Prompt not found: {}", self.name)),
        };

        print_json(&output)
    }
}
