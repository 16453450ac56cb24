//! Shared constants used across postlist crates.

/// Default base URL of the remote posts provider.
pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";

/// Path segment of the posts collection under the provider base URL.
pub const POSTS_COLLECTION_PATH: &str = "posts";

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Delimiter joining tags in both the address bar and the provider query.
pub const TAG_DELIMITER: char = ',';

/// Address-bar key for the 1-based page number.
pub const QUERY_KEY_PAGE: &str = "page";
/// Address-bar key for the free-text search.
pub const QUERY_KEY_SEARCH: &str = "search";
/// Address-bar key for the comma-joined tag selection.
pub const QUERY_KEY_TAGS: &str = "tags";
