//! Notion storage connector for promptd.
//!
//! This crate provides:
//! - Raw record types deserialized from the Notion database query API
//! - The `RecordSource` trait ("fetch all current records")
//! - `NotionClient`, the concrete HTTP implementation

pub mod record;
pub mod source;

// Re-export main types
pub use record::{RawProperty, RawRecord, SelectOption, TextSegment};
pub use source::{NotionClient, RecordSource};
