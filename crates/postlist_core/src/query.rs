//! Bidirectional mapping between [`FilterState`] and the address-bar query string.
//!
//! Decoding never fails: anything a shared link can contain is normalized to a
//! valid state, and the irregularities are reported as [`QueryAnomaly`] values
//! for logging.

use crate::constants::{QUERY_KEY_PAGE, QUERY_KEY_SEARCH, QUERY_KEY_TAGS, TAG_DELIMITER};
use crate::models::FilterState;
use std::fmt;

/// Irregularity found while decoding a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAnomaly {
    /// `page` was present but not a positive integer; the raw value is kept.
    InvalidPage(String),
    /// A recognized key appeared more than once; later values were ignored.
    DuplicateKey(String),
    /// A key this view does not understand.
    UnknownKey(String),
    /// The value for this key was not valid UTF-8 after percent-decoding.
    LossyEncoding(String),
}

impl fmt::Display for QueryAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPage(raw) => write!(f, "invalid page '{}', using 1", raw),
            Self::DuplicateKey(key) => write!(f, "duplicate '{}' ignored", key),
            Self::UnknownKey(key) => write!(f, "unrecognized key '{}' ignored", key),
            Self::LossyEncoding(key) => write!(f, "'{}' is not valid UTF-8", key),
        }
    }
}

/// Serialize `state` as `page=..[&search=..][&tags=..]` (no leading `?`).
///
/// Empty search and tag selections are omitted. Each tag is percent-encoded
/// on its own and joined with a raw delimiter.
pub fn encode(state: &FilterState) -> String {
    let mut parts = vec![format!("{}={}", QUERY_KEY_PAGE, state.page())];
    if !state.search().is_empty() {
        parts.push(format!(
            "{}={}",
            QUERY_KEY_SEARCH,
            urlencoding::encode(state.search())
        ));
    }
    if !state.tags().is_empty() {
        let joined = state
            .tags()
            .iter()
            .map(|tag| urlencoding::encode(tag).into_owned())
            .collect::<Vec<_>>()
            .join(&TAG_DELIMITER.to_string());
        parts.push(format!("{}={}", QUERY_KEY_TAGS, joined));
    }
    parts.join("&")
}

/// [`encode`] with the leading `?`, as shown in the address bar.
pub fn encode_location(state: &FilterState) -> String {
    format!("?{}", encode(state))
}

/// Parse a query string into a [`FilterState`], applying defaults for anything
/// missing or malformed.
pub fn decode(query: &str) -> FilterState {
    decode_with_anomalies(query).0
}

/// Like [`decode`], also returning every irregularity that was normalized away.
pub fn decode_with_anomalies(query: &str) -> (FilterState, Vec<QueryAnomaly>) {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut anomalies = Vec::new();
    let mut page: Option<String> = None;
    let mut search: Option<String> = None;
    let mut tags: Option<String> = None;

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key).unwrap_or_else(|lossy| lossy);
        let slot = match key.as_str() {
            QUERY_KEY_PAGE => &mut page,
            QUERY_KEY_SEARCH => &mut search,
            QUERY_KEY_TAGS => &mut tags,
            _ => {
                anomalies.push(QueryAnomaly::UnknownKey(key));
                continue;
            }
        };
        if slot.is_some() {
            anomalies.push(QueryAnomaly::DuplicateKey(key));
            continue;
        }
        let value = match decode_component(raw_value) {
            Ok(value) => value,
            Err(lossy) => {
                anomalies.push(QueryAnomaly::LossyEncoding(key));
                lossy
            }
        };
        *slot = Some(value);
    }

    let page = match page {
        None => 1,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value >= 1 => value,
            _ => {
                anomalies.push(QueryAnomaly::InvalidPage(raw));
                1
            }
        },
    };
    let tags = tags.unwrap_or_default();
    let tags = tags
        .split(TAG_DELIMITER)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string);

    (
        FilterState::new(page, search.unwrap_or_default(), tags),
        anomalies,
    )
}

/// Percent-decode one key or value, treating `+` as a space.
///
/// # Errors
/// Returns the lossily decoded text when the bytes are not valid UTF-8.
fn decode_component(raw: &str) -> Result<String, String> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Ok(decoded.into_owned()),
        Err(_) => {
            let bytes = urlencoding::decode_binary(spaced.as_bytes());
            Err(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
