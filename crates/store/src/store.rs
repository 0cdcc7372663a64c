//! The cache-backed prompt store.
//!
//! `PromptStore` owns the in-memory snapshot, its refresh/invalidation
//! policy, and every query operation. A snapshot is immutable and replaced
//! atomically: readers observe either the old or the new list in full,
//! never a mix. Concurrent refreshes coalesce onto a single upstream fetch.

use crate::normalize::normalize_record;
use crate::types::{
    CategoryMatch, HandlingMode, MatchType, Prompt, PromptInfo, PromptPage, SearchResult,
    CATEGORY_ALL,
};
use chrono::{DateTime, Utc};
use promptd_core::AppResult;
use promptd_notion::RecordSource;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Enforced floor for the cache expiry. Configured values below this are
/// clamped up with a warning.
pub const MIN_CACHE_EXPIRY: Duration = Duration::from_secs(1);

/// Default cache expiry (5 minutes).
pub const DEFAULT_CACHE_EXPIRY: Duration = Duration::from_secs(5 * 60);

/// An immutable point-in-time view of all prompts.
struct Snapshot {
    prompts: Arc<Vec<Prompt>>,
    taken_at: Instant,
    fetched_at: DateTime<Utc>,
}

/// The cache-backed prompt store.
///
/// Holds one snapshot at a time behind a read-write lock. Queries read the
/// current snapshot; a refresh builds the replacement off-line and swaps it
/// in with a single write-lock assignment.
pub struct PromptStore {
    source: Arc<dyn RecordSource>,
    snapshot: RwLock<Option<Snapshot>>,
    // Serializes refreshes; waiters re-check freshness after acquiring so
    // at most one upstream fetch is in flight at a time
    refresh_lock: Mutex<()>,
    expiry: RwLock<Duration>,
    mode: RwLock<HandlingMode>,
}

impl PromptStore {
    /// Create a store with the default expiry and handling mode.
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_settings(source, DEFAULT_CACHE_EXPIRY, HandlingMode::ReturnOnly)
    }

    /// Create a store with explicit settings.
    ///
    /// The expiry is floor-clamped to [`MIN_CACHE_EXPIRY`].
    pub fn with_settings(
        source: Arc<dyn RecordSource>,
        expiry: Duration,
        mode: HandlingMode,
    ) -> Self {
        Self {
            source,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            expiry: RwLock::new(clamp_expiry(expiry)),
            mode: RwLock::new(mode),
        }
    }

    /// Return the current prompt list, refreshing first when the snapshot
    /// is absent or has outlived the expiry.
    ///
    /// An expired snapshot is never served: if the refresh fails, the
    /// failure propagates and the old snapshot is left in place untouched.
    pub async fn get_prompts(&self) -> AppResult<Arc<Vec<Prompt>>> {
        if let Some(prompts) = self.fresh_prompts().await {
            return Ok(prompts);
        }
        self.refresh().await
    }

    /// Unconditionally refresh the cache and return the new prompt list.
    pub async fn refresh_cache(&self) -> AppResult<Arc<Vec<Prompt>>> {
        self.refresh().await
    }

    /// Drop the snapshot to the cold state without fetching.
    ///
    /// The next `get_prompts()` triggers a refresh.
    pub async fn clear_cache(&self) {
        tracing::debug!("Clearing prompt cache");
        *self.snapshot.write().await = None;
    }

    /// First prompt in snapshot order whose name equals `name` exactly.
    pub async fn find_prompt_by_name(&self, name: &str) -> AppResult<Option<Prompt>> {
        let prompts = self.get_prompts().await?;
        Ok(prompts.iter().find(|p| p.name == name).cloned())
    }

    /// Prompt with the exact upstream id.
    pub async fn find_prompt_by_id(&self, id: &str) -> AppResult<Option<Prompt>> {
        let prompts = self.get_prompts().await?;
        Ok(prompts.iter().find(|p| p.id == id).cloned())
    }

    /// The snapshot mapped to `PromptInfo`, preserving order.
    pub async fn get_prompt_list(&self) -> AppResult<Vec<PromptInfo>> {
        let prompts = self.get_prompts().await?;
        Ok(prompts.iter().map(PromptInfo::from).collect())
    }

    /// Prompts whose category set matches `category` under the given policy.
    ///
    /// `"all"` (case-insensitive) and the empty string bypass filtering and
    /// return every prompt.
    pub async fn get_prompts_by_category(
        &self,
        category: &str,
        policy: CategoryMatch,
    ) -> AppResult<Vec<Prompt>> {
        let prompts = self.get_prompts().await?;

        if is_all_categories(category) {
            return Ok(prompts.as_ref().clone());
        }

        Ok(prompts
            .iter()
            .filter(|p| {
                p.categories.iter().any(|label| match policy {
                    CategoryMatch::Exact => label == category,
                    CategoryMatch::Substring => label.contains(category),
                })
            })
            .cloned()
            .collect())
    }

    /// Case-insensitive substring search across name, description, and
    /// content.
    ///
    /// Each matching prompt appears once, classified by the
    /// highest-priority field it matched (name > description > content).
    pub async fn search_prompts(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let prompts = self.get_prompts().await?;
        let needle = query.to_lowercase();

        Ok(prompts
            .iter()
            .filter_map(|p| {
                let match_type = if p.name.to_lowercase().contains(&needle) {
                    MatchType::Name
                } else if p.description.to_lowercase().contains(&needle) {
                    MatchType::Description
                } else if p.content.to_lowercase().contains(&needle) {
                    MatchType::Content
                } else {
                    return None;
                };

                Some(SearchResult {
                    info: PromptInfo::from(p),
                    match_type,
                })
            })
            .collect())
    }

    /// Deduplicated union of every prompt's category labels.
    ///
    /// The `"all"` sentinel is always present, whether or not any prompt
    /// carries it.
    pub async fn list_categories(&self) -> AppResult<Vec<String>> {
        let prompts = self.get_prompts().await?;

        let mut categories = vec![CATEGORY_ALL.to_string()];
        for prompt in prompts.iter() {
            for label in &prompt.categories {
                if !categories.contains(label) {
                    categories.push(label.clone());
                }
            }
        }

        Ok(categories)
    }

    /// One page of the `PromptInfo` listing.
    ///
    /// `page` and `page_size` are clamped to a minimum of 1. A page beyond
    /// the last yields an empty window, not an error.
    pub async fn get_paginated_prompts(
        &self,
        page: usize,
        page_size: usize,
    ) -> AppResult<PromptPage> {
        let prompts = self.get_prompts().await?;

        let page = page.max(1);
        let page_size = page_size.max(1);

        let total = prompts.len();
        let total_pages = total.div_ceil(page_size);

        // Saturate: an absurdly large page must yield an empty window,
        // not an overflow
        let skip = (page - 1).saturating_mul(page_size);

        let items = prompts
            .iter()
            .skip(skip)
            .take(page_size)
            .map(PromptInfo::from)
            .collect();

        Ok(PromptPage {
            items,
            total,
            page,
            page_size,
            total_pages,
        })
    }

    /// Set the cache expiry, floor-clamped to [`MIN_CACHE_EXPIRY`].
    pub async fn set_cache_expiry(&self, expiry: Duration) {
        *self.expiry.write().await = clamp_expiry(expiry);
    }

    /// The effective cache expiry.
    pub async fn cache_expiry(&self) -> Duration {
        *self.expiry.read().await
    }

    /// Set the default handling mode for composed results.
    pub async fn set_handling_mode(&self, mode: HandlingMode) {
        *self.mode.write().await = mode;
    }

    /// The default handling mode.
    pub async fn handling_mode(&self) -> HandlingMode {
        *self.mode.read().await
    }

    /// Capture time of the current snapshot, if any.
    pub async fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.as_ref().map(|s| s.fetched_at)
    }

    /// The current prompt list when the snapshot exists and is fresh.
    async fn fresh_prompts(&self) -> Option<Arc<Vec<Prompt>>> {
        let expiry = *self.expiry.read().await;
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| s.taken_at.elapsed() < expiry)
            .map(|s| Arc::clone(&s.prompts))
    }

    /// Fetch, normalize, and atomically install a new snapshot.
    ///
    /// Callers that were waiting on an in-flight refresh adopt its result
    /// instead of fetching again. A fetch failure leaves the existing
    /// snapshot untouched.
    async fn refresh(&self) -> AppResult<Arc<Vec<Prompt>>> {
        let wait_start = Instant::now();
        let _guard = self.refresh_lock.lock().await;

        // A refresh that completed while we were queued satisfies this call
        {
            let guard = self.snapshot.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.taken_at >= wait_start {
                    return Ok(Arc::clone(&snapshot.prompts));
                }
            }
        }

        tracing::info!("Refreshing prompt cache");
        let records = self.source.fetch_all().await?;

        let total = records.len();
        let prompts: Vec<Prompt> = records.iter().filter_map(normalize_record).collect();
        let skipped = total - prompts.len();
        if skipped > 0 {
            tracing::warn!("Skipped {} of {} records during normalization", skipped, total);
        }
        tracing::info!("Cached {} prompts", prompts.len());

        let snapshot = Snapshot {
            prompts: Arc::new(prompts),
            taken_at: Instant::now(),
            fetched_at: Utc::now(),
        };
        let list = Arc::clone(&snapshot.prompts);

        *self.snapshot.write().await = Some(snapshot);

        Ok(list)
    }
}

/// Clamp an expiry to the enforced floor, warning when it applies.
fn clamp_expiry(expiry: Duration) -> Duration {
    if expiry < MIN_CACHE_EXPIRY {
        tracing::warn!(
            "Cache expiry {:?} is below the {:?} floor; clamping up",
            expiry,
            MIN_CACHE_EXPIRY
        );
        MIN_CACHE_EXPIRY
    } else {
        expiry
    }
}

/// Values that mean "every category".
fn is_all_categories(category: &str) -> bool {
    let trimmed = category.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(CATEGORY_ALL)
}
