//! Core library for postlist (config, models, query codec, remote provider client).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across postlist crates.
pub mod constants;
/// Environment mutation helpers for tests.
pub mod env;
/// Application error types.
pub mod error;
/// Filter state, records, and request status models.
pub mod models;
/// Remote posts provider client (list fetcher + tag catalog loader).
pub mod provider;
/// Query-string codec for the address bar.
pub mod query;

pub use config::Config;
pub use constants::*;
pub use error::AppError;
pub use models::{FetchParams, FilterState, PageResult, Record, RequestStatus, TagCatalog};
pub use provider::PostsClient;
