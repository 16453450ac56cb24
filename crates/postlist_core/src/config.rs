//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the provider base URL.
pub const API_URL_ENV: &str = "POSTLIST_API_URL";
/// Environment variable holding the page size.
pub const PAGE_SIZE_ENV: &str = "POSTLIST_PAGE_SIZE";
/// Environment variable holding the catalog sample size.
pub const CATALOG_SAMPLE_ENV: &str = "POSTLIST_CATALOG_SAMPLE";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_SECS_ENV: &str = "POSTLIST_TIMEOUT_SECS";
/// Environment flag enabling backend perf logging.
pub const PERF_LOG_ENV: &str = "POSTLIST_BACKEND_PERF_LOG";

/// Runtime configuration for postlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub page_size: usize,
    /// `limit` sent with the catalog sample request; `None` uses the provider default.
    pub catalog_sample_limit: Option<usize>,
    /// `None` means requests may stay in flight indefinitely.
    pub request_timeout: Option<Duration>,
    pub perf_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            catalog_sample_limit: None,
            request_timeout: None,
            perf_log: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn positive_from_env(name: &str) -> Option<usize> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("Ignoring {}='{}': expected a positive integer", name, raw);
            None
        }
    }
}

fn non_empty_from_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or invalid.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: non_empty_from_env(API_URL_ENV).unwrap_or(defaults.api_base_url),
            page_size: positive_from_env(PAGE_SIZE_ENV).unwrap_or(defaults.page_size),
            catalog_sample_limit: positive_from_env(CATALOG_SAMPLE_ENV),
            request_timeout: positive_from_env(TIMEOUT_SECS_ENV)
                .map(|secs| Duration::from_secs(secs as u64)),
            perf_log: env_flag_enabled(PERF_LOG_ENV),
        }
    }
}
