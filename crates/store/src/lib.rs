//! Prompt store for promptd.
//!
//! This crate is the core of the system:
//! - Record normalization (raw upstream records -> validated `Prompt`s)
//! - The cache-backed `PromptStore` with its refresh/query operations
//! - The composition engine (placeholder substitution and handling modes)

pub mod compose;
pub mod normalize;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export main types
pub use compose::compose_text;
pub use normalize::normalize_record;
pub use store::{PromptStore, MIN_CACHE_EXPIRY};
pub use types::{
    CategoryMatch, HandledPrompt, HandlingMode, MatchType, Prompt, PromptInfo, PromptPage,
    SearchResult, CATEGORY_ALL, UNCATEGORIZED,
};
