//! List envelope normalization.

use serde_json::Value;

use crate::error::{ConsoleError, Result};
use crate::types::ListResult;

/// The two list shapes the backend produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// `{ "content": [...], "totalElements": n }`
    Paged { content: Vec<Value>, total: u64 },
    /// `[...]`
    Bare(Vec<Value>),
}

impl ListEnvelope {
    /// Decode a list response body. Anything that is neither a page nor an
    /// array is rejected rather than read partially.
    pub fn decode(resource: &str, body: Value) -> Result<Self> {
        match body {
            Value::Array(items) => Ok(ListEnvelope::Bare(items)),
            Value::Object(mut map) => {
                let content = match map.remove("content") {
                    Some(Value::Array(items)) => items,
                    _ => return Err(ConsoleError::page_model_mismatch(resource)),
                };
                let total = map
                    .get("totalElements")
                    .and_then(Value::as_u64)
                    .unwrap_or(content.len() as u64);
                Ok(ListEnvelope::Paged { content, total })
            }
            _ => Err(ConsoleError::page_model_mismatch(resource)),
        }
    }

    pub fn into_result(self) -> ListResult {
        match self {
            ListEnvelope::Paged { content, total } => ListResult {
                data: content,
                total,
            },
            ListEnvelope::Bare(items) => {
                let total = items.len() as u64;
                ListResult { data: items, total }
            }
        }
    }
}
