//! Request lifecycle status shown by the view.

use serde::Serialize;

/// Status of the current list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// Human-readable failure reason.
    Failed(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}
