//! Shortener backend integration module.
//!
//! Provides the REST client for listing and managing link records.

pub mod client;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod models;

pub use client::{LinkApi, ShortenerClient};
pub use error::ApiError;
pub use models::Link;
