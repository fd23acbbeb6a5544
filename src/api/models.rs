//! Shortener API models and data structures.
//!
//! Contains the link record as served by the backend, request payloads,
//! and helpers for the timestamp formats the backend emits.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a shortened link.
///
/// Contains everything the admin table and the shorten widget display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// Unique short code
    pub key: String,
    /// Destination the short code redirects to
    pub target_url: String,
    /// Redirect counter, maintained by the server
    #[serde(default)]
    pub clicks: u64,
    /// Whether the short code currently redirects
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created_at: Option<String>,
    /// Fully-built short URL, only present in create responses
    #[serde(default, rename = "url_completa", skip_serializing_if = "Option::is_none")]
    pub full_short_url: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Link {
    /// Create a new active link with no clicks.
    ///
    /// # Arguments
    /// * `key` - Short code
    /// * `target_url` - Destination URL
    ///
    /// # Returns
    /// * `Link` - New link instance
    #[cfg(test)]
    pub fn new(key: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target_url: target_url.into(),
            clicks: 0,
            is_active: true,
            created_at: None,
            full_short_url: None,
        }
    }

    /// Creation time in milliseconds since the Unix epoch.
    ///
    /// # Returns
    /// * `i64` - Milliseconds, or `i64::MIN` when the timestamp is missing or
    ///   unparsable, so such links sort before any real date
    pub fn created_at_millis(&self) -> i64 {
        self.created_at
            .as_deref()
            .and_then(parse_created_at)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(i64::MIN)
    }

    /// Format the creation timestamp as a readable string.
    ///
    /// # Returns
    /// * `String` - Formatted date (e.g., "15/01/2024 09:30")
    ///
    /// # Details
    /// Missing timestamps render as "Unknown date"; unparsable ones are echoed as-is.
    pub fn format_created_at(&self) -> String {
        match self.created_at.as_deref() {
            None | Some("") => "Unknown date".to_string(),
            Some(raw) => match parse_created_at(raw) {
                Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
                None => raw.to_string(),
            },
        }
    }
}

/// Body of `POST /url`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateLink {
    pub target_url: String,
}

/// Body of `PUT /urls/{key}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateLink {
    pub key: String,
    pub target_url: String,
    pub is_active: bool,
}

/// Parse a backend timestamp.
///
/// # Arguments
/// * `raw` - Timestamp string
///
/// # Returns
/// * `Option<DateTime<Utc>>` - Parsed instant, or None if no known format matches
///
/// # Details
/// Accepts RFC 3339, naive ISO date-times (with `T` or space, optional
/// fractional seconds) and bare dates. Naive values are taken as UTC.
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
