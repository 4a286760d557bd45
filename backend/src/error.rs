//! Error types for graph transformation and upstream fetches.

use thiserror::Error;

/// Errors raised while talking to the statistics endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[cfg(feature = "upstream-client")]
    #[error("request to statistics endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("statistics endpoint returned HTTP {0}")]
    Status(u16),

    /// The body could not be decoded as a history payload.
    #[error("failed to decode statistics payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The source has nothing to serve.
    #[error("statistics source unavailable: {0}")]
    Unavailable(String),
}

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A tooltip label did not match `H:MM` / `HH:MM`.
    #[error("invalid tooltip label '{label}': expected H:MM or HH:MM")]
    InvalidTooltipLabel { label: String },

    /// A bounded time range whose start is not before its end.
    #[error("invalid time range: {0}")]
    InvalidRange(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl GraphError {
    pub(crate) fn invalid_label(label: &str) -> Self {
        GraphError::InvalidTooltipLabel {
            label: label.to_string(),
        }
    }
}
