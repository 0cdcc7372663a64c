//! Shared test support: raw-record builders and a mock record source.

use promptd_core::{AppError, AppResult};
use promptd_notion::{RawRecord, RecordSource};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Build a raw upstream record in the Notion query-response shape.
///
/// `name: None` omits the title property entirely; `Some("")` produces an
/// empty title.
pub(crate) fn raw_record(
    id: &str,
    name: Option<&str>,
    content: &str,
    description: &str,
    categories: &[&str],
) -> RawRecord {
    let mut properties = serde_json::Map::new();

    if let Some(name) = name {
        let segments: Vec<serde_json::Value> = if name.is_empty() {
            vec![]
        } else {
            vec![serde_json::json!({"plain_text": name})]
        };
        properties.insert(
            "Name".to_string(),
            serde_json::json!({"type": "title", "title": segments}),
        );
    }

    if !content.is_empty() {
        properties.insert(
            "Content".to_string(),
            serde_json::json!({
                "type": "rich_text",
                "rich_text": [{"plain_text": content}]
            }),
        );
    }

    if !description.is_empty() {
        properties.insert(
            "Description".to_string(),
            serde_json::json!({
                "type": "rich_text",
                "rich_text": [{"plain_text": description}]
            }),
        );
    }

    if !categories.is_empty() {
        let options: Vec<serde_json::Value> = categories
            .iter()
            .map(|c| serde_json::json!({"name": c}))
            .collect();
        properties.insert(
            "Category".to_string(),
            serde_json::json!({"type": "multi_select", "multi_select": options}),
        );
    }

    serde_json::from_value(serde_json::json!({
        "id": id,
        "properties": properties
    }))
    .unwrap()
}

/// In-memory record source with a fetch counter, a failure switch, and an
/// optional per-fetch delay for concurrency tests.
pub(crate) struct MockSource {
    records: Vec<RawRecord>,
    fetches: AtomicUsize,
    fail: AtomicBool,
    delay: Duration,
}

impl MockSource {
    pub(crate) fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            fetches: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl RecordSource for MockSource {
    async fn fetch_all(&self) -> AppResult<Vec<RawRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Source("mock connector offline".to_string()));
        }

        Ok(self.records.clone())
    }
}

/// Five distinct prompts covering the search/category/pagination cases.
pub(crate) fn sample_records() -> Vec<RawRecord> {
    vec![
        raw_record(
            "id-1",
            Some("Translator"),
            "translate this: {{USER_INPUT}}",
            "helps translate",
            &["language"],
        ),
        raw_record(
            "id-2",
            Some("Summarizer"),
            "summarize: {{USER_INPUT}}",
            "condenses text",
            &["writing", "language"],
        ),
        raw_record(
            "id-3",
            Some("Daily Report"),
            "report for {{CURRENT_DATE}}: {{USER_INPUT}}",
            "",
            &["reporting"],
        ),
        raw_record("id-4", Some("Scratch"), "{{USER_INPUT}}", "", &[]),
        raw_record(
            "id-5",
            Some("Code Review"),
            "review the following code: {{USER_INPUT}}",
            "reviews source code",
            &["engineering"],
        ),
    ]
}
