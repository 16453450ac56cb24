//! Filter state owned by the view controller and the fetch parameters derived from it.

use crate::constants::TAG_DELIMITER;
use serde::Serialize;
use std::collections::BTreeSet;

/// Whether `tag` can live in a [`FilterState`] without breaking the codec.
///
/// Empty tags and tags containing the delimiter cannot round-trip through a
/// comma-joined list, so they are never admitted.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.contains(TAG_DELIMITER)
}

/// Canonical in-memory view filter: current page, search text, and tag selection.
///
/// `page` is always at least 1 and every tag satisfies [`is_valid_tag`]. Tags
/// are kept in lexicographic order, which is also the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterState {
    page: u32,
    search: String,
    tags: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            tags: BTreeSet::new(),
        }
    }
}

impl FilterState {
    /// Build a state, clamping `page` to 1 and dropping tags that fail
    /// [`is_valid_tag`].
    pub fn new<I, T>(page: u32, search: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut state = Self {
            page: page.max(1),
            search: search.into(),
            tags: BTreeSet::new(),
        };
        state.insert_tags(tags);
        state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Move to `page` (clamped to 1) keeping search and tags.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Replace the search text. A new filter invalidates the page, so it resets to 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Replace the tag selection and reset the page to 1.
    ///
    /// # Returns
    /// The tags that were rejected by [`is_valid_tag`].
    pub fn set_tags<I, T>(&mut self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.clear();
        self.page = 1;
        self.insert_tags(tags)
    }

    fn insert_tags<I, T>(&mut self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut rejected = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if is_valid_tag(&tag) {
                self.tags.insert(tag);
            } else {
                rejected.push(tag);
            }
        }
        rejected
    }

    /// Project this state into the parameters of a remote list query.
    pub fn fetch_params(&self, limit: usize) -> FetchParams {
        FetchParams {
            page: self.page,
            limit,
            search: self.search.clone(),
            tags: self.tags.iter().cloned().collect(),
        }
    }
}

/// Parameters of one remote list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page: u32,
    pub limit: usize,
    pub search: String,
    /// Tag filter in canonical order.
    pub tags: Vec<String>,
}

impl FetchParams {
    pub fn new(page: u32, limit: usize, search: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            page: page.max(1),
            limit,
            search: search.into(),
            tags,
        }
    }

    /// Zero-based row offset of the first record on this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.limit)
    }

    /// Free-text filter, present only when the search is non-empty.
    pub fn text_filter(&self) -> Option<&str> {
        Some(self.search.as_str()).filter(|search| !search.is_empty())
    }

    /// Comma-joined tag filter, present only when at least one tag is selected.
    pub fn tag_filter(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }
        Some(self.tags.join(&TAG_DELIMITER.to_string()))
    }

    /// Query pairs sent to the provider: `skip`/`limit` always, `q`/`tags` only
    /// when non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.offset().to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = self.text_filter() {
            pairs.push(("q", search.to_string()));
        }
        if let Some(tags) = self.tag_filter() {
            pairs.push(("tags", tags));
        }
        pairs
    }
}
