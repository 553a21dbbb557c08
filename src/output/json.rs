//! `--format json` envelope
//!
//! Every JSON document moveez prints has the shape
//! `{"data": ..., "meta": {"timestamp", "version", "count"?}}`.
//! `count` is only present for lists.

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339, UTC
    pub timestamp: String,

    /// moveez version that produced the document
    pub version: &'static str,

    /// Number of items when `data` is a list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Metadata {
    fn now(count: Option<usize>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            count,
        }
    }
}

/// Wrap a single value (details view, ratings, provider map) and pretty-print it.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data,
        meta: Metadata::now(None),
    })
}

/// Wrap a list of rows, recording how many there are.
pub fn format_json_list<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data: items,
        meta: Metadata::now(Some(items.len())),
    })
}
