//! Shortener REST API client implementation.
//!
//! Handles listing, creating, updating and deleting link records.

use crate::api::error::ApiError;
use crate::api::models::{CreateLink, Link, UpdateLink};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Operations the UI needs from the shortener backend.
///
/// Every call issues exactly one request. Callers reload the full list
/// after a successful mutation; nothing here merges results.
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// `GET /urls`
    async fn list_all(&self) -> Result<Vec<Link>, ApiError>;

    /// `POST /url`
    async fn create(&self, target_url: &str) -> Result<Link, ApiError>;

    /// `PUT /urls/{key}`
    async fn update(&self, key: &str, target_url: &str, is_active: bool)
    -> Result<Link, ApiError>;

    /// `DELETE /urls/{key}`
    async fn delete(&self, key: &str) -> Result<(), ApiError>;
}

/// HTTP client for the shortener backend.
#[derive(Debug, Clone)]
pub struct ShortenerClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL every endpoint is joined onto
    base_url: Url,
}

impl ShortenerClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<ShortenerClient, ApiError>` - New client or error
    ///
    /// # Details
    /// The base URL must be an absolute http(s) URL. The request timeout comes
    /// from `request_timeout_secs`; no other timeout or retry is applied.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.api_base_url.trim())
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", config.api_base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.api_base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Join path segments onto the base URL.
    ///
    /// Segments are percent-encoded, so keys containing `/` or `?` stay a
    /// single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Turn a non-2xx response into an error, reading the body for a message.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "shortener API returned an error");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LinkApi for ShortenerClient {
    async fn list_all(&self) -> Result<Vec<Link>, ApiError> {
        let url = self.endpoint(&["urls"])?;
        tracing::debug!(%url, "listing links");
        let response = Self::check(self.client.get(url).send().await?).await?;
        let links: Vec<Link> = Self::decode(response).await?;
        tracing::debug!(count = links.len(), "links listed");
        Ok(links)
    }

    async fn create(&self, target_url: &str) -> Result<Link, ApiError> {
        let url = self.endpoint(&["url"])?;
        tracing::debug!(%url, target_url, "creating link");
        let body = CreateLink {
            target_url: target_url.to_string(),
        };
        let response = Self::check(self.client.post(url).json(&body).send().await?).await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        key: &str,
        target_url: &str,
        is_active: bool,
    ) -> Result<Link, ApiError> {
        let url = self.endpoint(&["urls", key])?;
        tracing::debug!(%url, target_url, is_active, "updating link");
        let body = UpdateLink {
            key: key.to_string(),
            target_url: target_url.to_string(),
            is_active,
        };
        let response = Self::check(self.client.put(url).json(&body).send().await?).await?;
        Self::decode(response).await
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["urls", key])?;
        tracing::debug!(%url, "deleting link");
        // Any 2xx counts; the ack body is ignored.
        Self::check(self.client.delete(url).send().await?).await?;
        Ok(())
    }
}
