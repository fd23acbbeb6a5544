//! In-memory `LinkApi` used by tests.
//!
//! Behaves like the backend (keys are generated, records persist between
//! calls) and records every request so tests can assert what went over
//! the wire.

use crate::api::client::LinkApi;
use crate::api::error::ApiError;
use crate::api::models::Link;
use async_trait::async_trait;
use std::sync::Mutex;

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(String),
    Update(String, String, bool),
    Delete(String),
}

#[derive(Debug, Default)]
pub struct FakeApi {
    links: Mutex<Vec<Link>>,
    requests: Mutex<Vec<Request>>,
    next_id: Mutex<u32>,
    fail_with: Mutex<Option<(u16, String)>>,
}

impl FakeApi {
    pub fn with_links(links: Vec<Link>) -> Self {
        Self {
            links: Mutex::new(links),
            ..Self::default()
        }
    }

    /// Make the next request fail with this status and body. Later
    /// requests succeed again.
    pub fn fail_next(&self, status: u16, body: &str) {
        *self.fail_with.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn links(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    fn record(&self, request: Request) -> Result<(), ApiError> {
        self.requests.lock().unwrap().push(request);
        match self.fail_with.lock().unwrap().take() {
            Some((status, body)) => Err(ApiError::from_response(status, &body)),
            None => Ok(()),
        }
    }

    fn not_found(key: &str) -> ApiError {
        ApiError::from_response(404, &format!(r#"{{"detail": "No link with key '{}'"}}"#, key))
    }
}

#[async_trait]
impl LinkApi for FakeApi {
    async fn list_all(&self) -> Result<Vec<Link>, ApiError> {
        self.record(Request::List)?;
        Ok(self.links())
    }

    async fn create(&self, target_url: &str) -> Result<Link, ApiError> {
        self.record(Request::Create(target_url.to_string()))?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let mut link = Link::new(format!("k{:04}", *next_id), target_url);
        link.created_at = Some(format!("2024-07-{:02}T12:00:00", (*next_id % 28) + 1));
        self.links.lock().unwrap().push(link.clone());
        link.full_short_url = Some(format!("http://localhost:8000/{}", link.key));
        Ok(link)
    }

    async fn update(
        &self,
        key: &str,
        target_url: &str,
        is_active: bool,
    ) -> Result<Link, ApiError> {
        self.record(Request::Update(key.to_string(), target_url.to_string(), is_active))?;
        let mut links = self.links.lock().unwrap();
        let link = links
            .iter_mut()
            .find(|l| l.key == key)
            .ok_or_else(|| Self::not_found(key))?;
        link.target_url = target_url.to_string();
        link.is_active = is_active;
        Ok(link.clone())
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.record(Request::Delete(key.to_string()))?;
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.key != key);
        if links.len() == before {
            return Err(Self::not_found(key));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_fail_next_affects_one_request() {
    let api = FakeApi::with_links(vec![Link::new("abc", "https://a.io")]);
    api.fail_next(503, "");

    let err = api.list_all().await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (HTTP 503)");
    assert_eq!(api.list_all().await.unwrap().len(), 1);
    assert_eq!(api.requests(), [Request::List, Request::List]);
}
