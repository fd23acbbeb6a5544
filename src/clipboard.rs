//! System clipboard integration.
//!
//! Copies short URLs so they can be pasted elsewhere.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not copy to clipboard: {0}")]
pub struct ClipboardError(String);

/// Something that can receive copied text.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard.
///
/// Opened lazily: headless sessions have no clipboard, and that should only
/// surface as an error when the user actually copies something.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| ClipboardError("clipboard unavailable".to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }
}
