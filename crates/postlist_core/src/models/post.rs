//! Post records as returned by the provider, result pages, and the tag catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One post row. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// One successfully fetched page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub items: Vec<Record>,
    /// Size of the full filtered set on the provider, not `items.len()`.
    pub total_count: u64,
    pub fetched_at: DateTime<Utc>,
}

impl PageResult {
    pub fn new(items: Vec<Record>, total_count: u64) -> Self {
        Self {
            items,
            total_count,
            fetched_at: Utc::now(),
        }
    }

    /// Number of pages needed to show `total_count` rows at `limit` per page.
    ///
    /// Always at least 1 so an empty result still has a current page.
    pub fn page_count(&self, limit: usize) -> u32 {
        page_count(self.total_count, limit)
    }
}

/// Number of pages for `total` rows at `limit` rows per page (minimum 1).
pub fn page_count(total: u64, limit: usize) -> u32 {
    if limit == 0 || total == 0 {
        return 1;
    }
    let pages = total.div_ceil(limit as u64);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Universe of selectable tags, sampled once from the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagCatalog(BTreeSet<String>);

impl TagCatalog {
    /// Union the tags of every record, dropping duplicates and empty values.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        Self(
            records
                .into_iter()
                .flat_map(|record| record.tags.iter())
                .filter(|tag| !tag.is_empty())
                .cloned()
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
