//! Errors raised while talking to the shortener backend.

use thiserror::Error;

/// Fallback shown when a failed response carries no readable message.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any non-2xx answer.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx answer whose body was not the expected JSON.
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Build a status error from a failed response body.
    ///
    /// # Arguments
    /// * `status` - HTTP status code
    /// * `body` - Raw response body
    ///
    /// # Returns
    /// * `ApiError` - Status error carrying the server message when one is present
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| format!("{} (HTTP {})", GENERIC_FAILURE, status));
        Self::Status { status, message }
    }
}

/// Pull a human-readable message out of an error body.
///
/// FastAPI reports `{"detail": "..."}`; other backends use `message`.
/// Structured `detail` arrays (validation errors) are not readable, so they
/// yield None.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .filter_map(|field| value.get(field)?.as_str())
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}
