//! The storage connector: `RecordSource` trait and the Notion client.
//!
//! The core depends on exactly one abstract operation — "fetch all current
//! records". `NotionClient` implements it against the database query
//! endpoint, following cursor pagination internally so callers always see a
//! full-collection result.
//! Notion API: https://developers.notion.com/reference/post-database-query

use crate::record::RawRecord;
use promptd_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Notion API version header value.
const NOTION_VERSION: &str = "2022-06-28";

/// Default base URL for the Notion API.
const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Page size requested per query round-trip.
const QUERY_PAGE_SIZE: u32 = 100;

/// Trait for upstream record sources.
///
/// This is the single seam between the prompt store and whatever performs
/// the actual network fetch.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every current record in the configured collection.
    ///
    /// # Returns
    /// The full sequence of raw records, or a connectivity/permission error.
    async fn fetch_all(&self) -> AppResult<Vec<RawRecord>>;
}

/// Database query request body.
#[derive(Debug, Serialize)]
struct QueryRequest {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
}

/// Database query response body.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<RawRecord>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Notion database client.
pub struct NotionClient {
    /// Base URL for the Notion API
    base_url: String,

    /// Integration token (bearer auth)
    token: String,

    /// Database id holding the prompt pages
    database_id: String,

    /// HTTP client
    client: reqwest::Client,
}

impl NotionClient {
    /// Create a new Notion client against the public API endpoint.
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token, database_id)
    }

    /// Create a new Notion client with a custom base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            database_id: database_id.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Run one query round-trip from the given cursor.
    async fn query_page(&self, start_cursor: Option<String>) -> AppResult<QueryResponse> {
        let url = format!("{}/v1/databases/{}/query", self.base_url, self.database_id);
        let body = QueryRequest {
            page_size: QUERY_PAGE_SIZE,
            start_cursor,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Failed to query Notion database: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Source(format!(
                "Notion API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse Notion response: {}", e)))
    }
}

#[async_trait::async_trait]
impl RecordSource for NotionClient {
    async fn fetch_all(&self) -> AppResult<Vec<RawRecord>> {
        tracing::info!("Fetching all records from Notion database");

        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.query_page(cursor.take()).await?;
            records.extend(page.results);

            if page.has_more {
                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    // has_more without a cursor would loop forever
                    None => break,
                }
            } else {
                break;
            }
        }

        tracing::info!("Fetched {} records from Notion", records.len());

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_targets_query_endpoint() {
        let client = NotionClient::new("secret", "db-123");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.database_id, "db-123");
    }

    #[test]
    fn test_query_request_omits_absent_cursor() {
        let body = QueryRequest {
            page_size: QUERY_PAGE_SIZE,
            start_cursor: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("start_cursor"));
    }

    #[test]
    fn test_query_response_defaults() {
        let response: QueryResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(response.results.is_empty());
        assert!(!response.has_more);
        assert!(response.next_cursor.is_none());
    }
}
