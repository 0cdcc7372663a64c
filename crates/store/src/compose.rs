//! The composition engine: placeholder substitution and handling modes.
//!
//! Substitution is ordered: the user-input placeholder is resolved first,
//! and contextual placeholders are only ever substituted inside the
//! template-owned text. Placeholder syntax embedded in the user input is
//! never expanded, so no double substitution can occur. Unrecognized
//! placeholders pass through untouched.

use crate::store::PromptStore;
use crate::types::{HandledPrompt, HandlingMode};
use chrono::Local;
use promptd_core::AppResult;

/// Primary input placeholder, replaced with the caller-supplied text.
pub const USER_INPUT: &str = "{{USER_INPUT}}";

/// Current date placeholder (YYYY-MM-DD).
pub const CURRENT_DATE: &str = "{{CURRENT_DATE}}";

/// Current time placeholder (HH:MM:SS).
pub const CURRENT_TIME: &str = "{{CURRENT_TIME}}";

/// Current date and time placeholder.
pub const CURRENT_DATETIME: &str = "{{CURRENT_DATETIME}}";

/// Placeholder for the resolved prompt's own name.
pub const PROMPT_NAME: &str = "{{PROMPT_NAME}}";

/// Maximum characters of user input echoed to the log.
const LOG_PREVIEW_CHARS: usize = 30;

/// Fixed result text for the unimplemented call-external-api mode.
const EXTERNAL_API_TEXT: &str =
    "External API handling is not implemented. The composed prompt was discarded.";

/// Note attached to return-only results.
const RETURN_ONLY_NOTE: &str =
    "Return this text to the caller as-is; do not feed it to further generation.";

/// Note attached to process-locally results.
const PROCESS_LOCALLY_NOTE: &str =
    "Feed this text to the caller's own local processing step.";

/// Compose a template with the caller's input and contextual values.
///
/// The template is split on the user-input token, contextual placeholders
/// are substituted within the template segments only, and the segments are
/// then joined with the verbatim user input.
pub fn compose_text(template: &str, prompt_name: &str, user_input: &str) -> String {
    let now = Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let time = now.format("%H:%M:%S").to_string();
    let datetime = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let segments: Vec<String> = template
        .split(USER_INPUT)
        .map(|segment| {
            segment
                .replace(CURRENT_DATETIME, &datetime)
                .replace(CURRENT_DATE, &date)
                .replace(CURRENT_TIME, &time)
                .replace(PROMPT_NAME, prompt_name)
        })
        .collect();

    segments.join(user_input)
}

/// A log-safe preview of the user input: at most 30 characters, with an
/// ellipsis when truncated. The full input is never logged.
fn input_preview(user_input: &str) -> String {
    let mut preview: String = user_input.chars().take(LOG_PREVIEW_CHARS).collect();
    if user_input.chars().count() > LOG_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

impl PromptStore {
    /// Compose the named prompt's template with the given input.
    ///
    /// Returns `Ok(None)` when no prompt has that name; there is no partial
    /// composition.
    pub async fn compose_prompt(
        &self,
        prompt_name: &str,
        user_input: &str,
    ) -> AppResult<Option<String>> {
        let Some(prompt) = self.find_prompt_by_name(prompt_name).await? else {
            tracing::warn!("Compose requested for unknown prompt: {}", prompt_name);
            return Ok(None);
        };

        tracing::info!(
            "Composing prompt '{}' with input: {}",
            prompt.name,
            input_preview(user_input)
        );

        Ok(Some(compose_text(&prompt.content, &prompt.name, user_input)))
    }

    /// Compose the named prompt, then wrap the result per the handling mode.
    ///
    /// The effective mode is the explicit override when given, otherwise
    /// the store's default.
    pub async fn compose_and_handle(
        &self,
        prompt_name: &str,
        user_input: &str,
        mode_override: Option<HandlingMode>,
    ) -> AppResult<Option<HandledPrompt>> {
        let Some(text) = self.compose_prompt(prompt_name, user_input).await? else {
            return Ok(None);
        };

        let mode = match mode_override {
            Some(mode) => mode,
            None => self.handling_mode().await,
        };

        let handled = match mode {
            HandlingMode::ReturnOnly => HandledPrompt {
                prompt_name: prompt_name.to_string(),
                text,
                mode,
                note: RETURN_ONLY_NOTE.to_string(),
            },
            HandlingMode::ProcessLocally => HandledPrompt {
                prompt_name: prompt_name.to_string(),
                text,
                mode,
                note: PROCESS_LOCALLY_NOTE.to_string(),
            },
            HandlingMode::CallExternalApi => HandledPrompt {
                prompt_name: prompt_name.to_string(),
                text: EXTERNAL_API_TEXT.to_string(),
                mode,
                note: EXTERNAL_API_TEXT.to_string(),
            },
        };

        Ok(Some(handled))
    }
}
