//! Raw record types from the Notion database query API.
//!
//! These mirror the transport-level page representation: a page id plus a
//! property map whose values are typed property payloads. Only the property
//! kinds the prompt schema uses are modeled; everything else deserializes
//! to `Unsupported` and is ignored downstream.

use serde::Deserialize;
use std::collections::HashMap;

/// One rich-text segment of a Notion property value.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSegment {
    /// Rendered plain text of the segment
    pub plain_text: String,
}

/// One option of a multi-select property value.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    /// Option label
    pub name: String,
}

/// A typed Notion property payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawProperty {
    /// Title property (the page's "Name" column)
    Title { title: Vec<TextSegment> },

    /// Rich-text property (multi-segment free text)
    RichText { rich_text: Vec<TextSegment> },

    /// Multi-select property (category labels)
    MultiSelect { multi_select: Vec<SelectOption> },

    /// Any property kind the prompt schema does not use
    #[serde(other)]
    Unsupported,
}

/// A raw page record as returned by the database query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    /// Opaque stable page id
    pub id: String,

    /// Property name -> typed payload
    #[serde(default)]
    pub properties: HashMap<String, RawProperty>,
}

impl RawRecord {
    /// Concatenate the segments of a title property, in order, no separators.
    pub fn title_text(&self, field: &str) -> Option<String> {
        match self.properties.get(field) {
            Some(RawProperty::Title { title }) => Some(join_segments(title)),
            _ => None,
        }
    }

    /// Concatenate the segments of a rich-text property, in order, no separators.
    pub fn rich_text(&self, field: &str) -> Option<String> {
        match self.properties.get(field) {
            Some(RawProperty::RichText { rich_text }) => Some(join_segments(rich_text)),
            _ => None,
        }
    }

    /// The option labels of a multi-select property, in display order.
    pub fn select_names(&self, field: &str) -> Option<Vec<String>> {
        match self.properties.get(field) {
            Some(RawProperty::MultiSelect { multi_select }) => {
                Some(multi_select.iter().map(|o| o.name.clone()).collect())
            }
            _ => None,
        }
    }
}

fn join_segments(segments: &[TextSegment]) -> String {
    segments.iter().map(|s| s.plain_text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from_json(json: &str) -> RawRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_page_record() {
        let record = record_from_json(
            r#"{
                "id": "page-1",
                "properties": {
                    "Name": {"type": "title", "title": [{"plain_text": "Translator"}]},
                    "Content": {"type": "rich_text", "rich_text": [
                        {"plain_text": "translate "},
                        {"plain_text": "this"}
                    ]},
                    "Category": {"type": "multi_select", "multi_select": [
                        {"name": "language"},
                        {"name": "tools"}
                    ]}
                }
            }"#,
        );

        assert_eq!(record.id, "page-1");
        assert_eq!(record.title_text("Name"), Some("Translator".to_string()));
        assert_eq!(record.rich_text("Content"), Some("translate this".to_string()));
        assert_eq!(
            record.select_names("Category"),
            Some(vec!["language".to_string(), "tools".to_string()])
        );
    }

    #[test]
    fn test_missing_property_is_none() {
        let record = record_from_json(r#"{"id": "page-2", "properties": {}}"#);
        assert_eq!(record.title_text("Name"), None);
        assert_eq!(record.rich_text("Content"), None);
        assert_eq!(record.select_names("Category"), None);
    }

    #[test]
    fn test_unsupported_property_kind_ignored() {
        let record = record_from_json(
            r#"{
                "id": "page-3",
                "properties": {
                    "Name": {"type": "checkbox", "checkbox": true}
                }
            }"#,
        );
        // A checkbox under "Name" is not a title; lookups stay None
        assert_eq!(record.title_text("Name"), None);
    }

    #[test]
    fn test_segment_concatenation_preserves_order() {
        let record = record_from_json(
            r#"{
                "id": "page-4",
                "properties": {
                    "Description": {"type": "rich_text", "rich_text": [
                        {"plain_text": "a"},
                        {"plain_text": "b"},
                        {"plain_text": "c"}
                    ]}
                }
            }"#,
        );
        assert_eq!(record.rich_text("Description"), Some("abc".to_string()));
    }
}
