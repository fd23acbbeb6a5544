//! Effect execution.
//!
//! `App` never performs I/O itself; it returns `Command`s. The dispatcher
//! runs network requests on tokio tasks and sends the outcome back to the
//! UI loop as an `ApiEvent`. Clipboard writes are quick and run inline.

use crate::api::{ApiError, Link, LinkApi};
use crate::clipboard::{ClipboardError, ClipboardSink};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Which screen asked for a link to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOrigin {
    /// Admin create popup, tagged with the popup's save id
    Modal { save_id: u64 },
    /// Quick-shorten tab
    Shorten,
}

/// One backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    LoadLinks {
        seq: u64,
    },
    Create {
        target_url: String,
        origin: CreateOrigin,
    },
    Update {
        key: String,
        target_url: String,
        is_active: bool,
        save_id: u64,
    },
    Delete {
        key: String,
    },
}

/// An effect requested by the UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Api(ApiRequest),
    Copy(String),
}

/// Completion of a `Command`, delivered on the UI thread.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded {
        seq: u64,
        result: Result<Vec<Link>, ApiError>,
    },
    Created {
        origin: CreateOrigin,
        result: Result<Link, ApiError>,
    },
    Updated {
        key: String,
        save_id: u64,
        result: Result<Link, ApiError>,
    },
    Deleted {
        key: String,
        result: Result<(), ApiError>,
    },
    Copied(Result<String, ClipboardError>),
}

/// Perform one request and wrap the outcome.
pub async fn execute(api: &dyn LinkApi, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::LoadLinks { seq } => ApiEvent::Loaded {
            seq,
            result: api.list_all().await,
        },
        ApiRequest::Create { target_url, origin } => ApiEvent::Created {
            origin,
            result: api.create(&target_url).await,
        },
        ApiRequest::Update {
            key,
            target_url,
            is_active,
            save_id,
        } => {
            let result = api.update(&key, &target_url, is_active).await;
            ApiEvent::Updated {
                key,
                save_id,
                result,
            }
        }
        ApiRequest::Delete { key } => {
            let result = api.delete(&key).await;
            ApiEvent::Deleted { key, result }
        }
    }
}

pub struct Dispatcher {
    api: Arc<dyn LinkApi>,
    clipboard: Box<dyn ClipboardSink>,
    tx: UnboundedSender<ApiEvent>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver the UI loop drains.
    pub fn new(
        api: Arc<dyn LinkApi>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> (Self, UnboundedReceiver<ApiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, clipboard, tx }, rx)
    }

    /// Start executing a command. Never blocks on the network.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Copy(text) => {
                let result = self.clipboard.copy(&text).map(|()| text);
                self.send(ApiEvent::Copied(result));
            }
            Command::Api(request) => {
                tracing::debug!(?request, "dispatching");
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let event = execute(api.as_ref(), request).await;
                    // The receiver is gone only when the UI has exited.
                    let _ = tx.send(event);
                });
            }
        }
    }

    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    fn send(&self, event: ApiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}
