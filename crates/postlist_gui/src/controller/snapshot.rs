//! Read-only projection of controller state handed to the presentation layer.

use chrono::{DateTime, Utc};
use postlist_core::{Record, RequestStatus, TagCatalog};
use std::collections::BTreeSet;

/// Lifecycle of the tag catalog, independent of list fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogStatus {
    #[default]
    NotRequested,
    Loading,
    Ready,
    /// Load failed; previously loaded tags (if any) stay selectable.
    Unavailable(String),
}

/// Everything the view needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewSnapshot<'a> {
    /// Rows of the last successful fetch (kept while a newer fetch is loading or failed).
    pub rows: &'a [Record],
    pub total_count: u64,
    pub page: u32,
    /// At least 1, and never below `page`.
    pub page_count: u32,
    pub limit: usize,
    pub search: &'a str,
    pub tags: &'a BTreeSet<String>,
    pub available_tags: &'a TagCatalog,
    pub status: &'a RequestStatus,
    pub catalog_status: &'a CatalogStatus,
    pub location: &'a str,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ViewSnapshot<'_> {
    /// The table (and pagination) is only shown for a settled, successful fetch.
    pub fn shows_table(&self) -> bool {
        matches!(self.status, RequestStatus::Success)
    }

    /// 1-based index range of the visible rows, e.g. `11..=20`, or `None` when empty.
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = u64::from(self.page.saturating_sub(1)) * self.limit as u64 + 1;
        Some((first, first + self.rows.len() as u64 - 1))
    }
}
