//! Application error types for the provider client and runtime wiring.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid provider URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the failure happened before any HTTP response was received.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            _ => false,
        }
    }
}
