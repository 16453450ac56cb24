//! Wire shapes of the provider's JSON responses.

use crate::models::{PageResult, Record};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct PostsResponse {
    #[serde(default)]
    pub(super) posts: Vec<Record>,
    #[serde(default)]
    pub(super) total: Option<u64>,
    #[serde(default)]
    pub(super) skip: Option<u64>,
}

impl PostsResponse {
    /// Convert to a [`PageResult`]; a missing `total` is estimated from the
    /// offset and the rows actually returned.
    pub(super) fn into_page(self, requested_offset: usize) -> PageResult {
        let total = self.total.unwrap_or_else(|| {
            self.skip.unwrap_or(requested_offset as u64) + self.posts.len() as u64
        });
        PageResult::new(self.posts, total)
    }
}

/// Human-readable reason for a failed provider response.
///
/// Prefers the JSON `message`/`error` field, then the raw body, then the
/// canonical status text.
pub fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
        {
            return message.to_string();
        }
    }

    body.trim().to_string()
}
