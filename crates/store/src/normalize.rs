//! Record normalization: raw upstream records -> validated `Prompt`s.
//!
//! Normalization is a pure function of one record. A record that cannot be
//! normalized (missing or empty name) is a data-quality skip, not a fatal
//! error: it is logged and excluded, and never aborts the batch.

use crate::types::{Prompt, UNCATEGORIZED};
use promptd_notion::RawRecord;

/// Upstream field holding the prompt name (title property).
const FIELD_NAME: &str = "Name";

/// Upstream field holding the template text.
const FIELD_CONTENT: &str = "Content";

/// Upstream field holding the description.
const FIELD_DESCRIPTION: &str = "Description";

/// Upstream field holding the category labels.
const FIELD_CATEGORY: &str = "Category";

/// Convert one raw upstream record into a validated `Prompt`.
///
/// Returns `None` (a logged skip) when the name field is missing or empty.
/// Multi-segment rich-text fields are concatenated in order with no
/// separators; an absent description defaults to the empty string; an empty
/// category list becomes the [`UNCATEGORIZED`] sentinel.
pub fn normalize_record(record: &RawRecord) -> Option<Prompt> {
    let name = record.title_text(FIELD_NAME).unwrap_or_default();
    if name.is_empty() {
        tracing::warn!("Skipping record {}: missing or empty name", record.id);
        return None;
    }

    let content = record.rich_text(FIELD_CONTENT).unwrap_or_default();
    let description = record.rich_text(FIELD_DESCRIPTION).unwrap_or_default();

    let mut categories = record.select_names(FIELD_CATEGORY).unwrap_or_default();
    if categories.is_empty() {
        categories.push(UNCATEGORIZED.to_string());
    }

    Some(Prompt {
        id: record.id.clone(),
        name,
        content,
        description,
        categories,
    })
}
