//! Domain types for the prompt store.
//!
//! This module defines the canonical `Prompt` entity, its content-free
//! `PromptInfo` projection, and the result/policy types used by the query
//! and composition operations.

use promptd_core::AppError;
use serde::{Deserialize, Serialize};

/// Sentinel category assigned to prompts whose upstream record has none.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Sentinel category label meaning "every prompt".
pub const CATEGORY_ALL: &str = "all";

/// A named text template with metadata, sourced from the upstream store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    /// Opaque stable identifier from the upstream store
    pub id: String,

    /// Human-chosen label. Expected unique in practice but not enforced;
    /// lookup-by-name returns the first match in snapshot order.
    pub name: String,

    /// Template text, may contain variable placeholders
    pub content: String,

    /// Free-text description, empty when absent upstream
    #[serde(default)]
    pub description: String,

    /// Category labels in display order, never empty (see [`UNCATEGORIZED`])
    pub categories: Vec<String>,
}

/// A projection of [`Prompt`] without the template content.
///
/// Used for listings, search results, and pagination, where shipping the
/// full template is unnecessary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptInfo {
    /// Opaque stable identifier
    pub id: String,

    /// Human-chosen label
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Category labels in display order
    pub categories: Vec<String>,
}

impl From<&Prompt> for PromptInfo {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id: prompt.id.clone(),
            name: prompt.name.clone(),
            description: prompt.description.clone(),
            categories: prompt.categories.clone(),
        }
    }
}

/// Which field a search query matched, in priority order.
///
/// A prompt matching on several fields is classified by the
/// highest-priority one only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Name,
    Description,
    Content,
}

/// One search hit: the prompt projection plus its match classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched prompt, without content
    pub info: PromptInfo,

    /// Field the query matched on
    #[serde(rename = "matchType")]
    pub match_type: MatchType,
}

/// One page of a paginated prompt listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptPage {
    /// The window of prompts for the requested page (empty past the end)
    pub items: Vec<PromptInfo>,

    /// Total prompt count across all pages
    pub total: usize,

    /// The (clamped) page number that was served, 1-based
    pub page: usize,

    /// The (clamped) page size that was applied
    #[serde(rename = "pageSize")]
    pub page_size: usize,

    /// Total page count, `ceil(total / page_size)`
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Matching policy for category filters.
///
/// The upstream behavior is genuinely ambiguous between exact equality and
/// substring inclusion, so the policy is an explicit parameter at the
/// filter boundary rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMatch {
    /// Label must equal the requested category exactly (case-sensitive)
    Exact,

    /// Label must contain the requested category as a substring
    Substring,
}

/// Policy controlling what metadata accompanies a composed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlingMode {
    /// The caller must not feed the composed text to further generation
    #[serde(rename = "return-only")]
    ReturnOnly,

    /// The caller should feed the composed text to its own local
    /// processing step
    #[serde(rename = "process-locally")]
    ProcessLocally,

    /// Declared but unimplemented extension point
    #[serde(rename = "call-external-api")]
    CallExternalApi,
}

impl HandlingMode {
    /// The canonical string form of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlingMode::ReturnOnly => "return-only",
            HandlingMode::ProcessLocally => "process-locally",
            HandlingMode::CallExternalApi => "call-external-api",
        }
    }
}

impl std::fmt::Display for HandlingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HandlingMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "return-only" => Ok(HandlingMode::ReturnOnly),
            "process-locally" => Ok(HandlingMode::ProcessLocally),
            "call-external-api" => Ok(HandlingMode::CallExternalApi),
            _ => Err(AppError::Config(format!(
                "Unknown handling mode: {}. Supported: return-only, process-locally, call-external-api",
                s
            ))),
        }
    }
}

/// A composed prompt wrapped with its handling-mode metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandledPrompt {
    /// Name of the prompt that was composed
    #[serde(rename = "promptName")]
    pub prompt_name: String,

    /// The composed text (or the not-implemented placeholder for
    /// [`HandlingMode::CallExternalApi`])
    pub text: String,

    /// Effective handling mode that was applied
    pub mode: HandlingMode,

    /// Human-readable instruction matching the mode
    pub note: String,
}
