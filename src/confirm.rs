//! Delete confirmation state.

use crate::api::Link;
use crate::ui::truncate_text;

/// Characters of the target URL shown in the confirmation popup.
pub const CONFIRM_TARGET_LEN: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteConfirm {
    #[default]
    Idle,
    Confirming {
        key: String,
        /// Already truncated for display
        target: String,
        clicks: u64,
    },
}

impl DeleteConfirm {
    pub fn is_active(&self) -> bool {
        matches!(self, DeleteConfirm::Confirming { .. })
    }

    /// Ask before deleting `link`.
    pub fn begin(&mut self, link: &Link) {
        *self = DeleteConfirm::Confirming {
            key: link.key.clone(),
            target: truncate_text(&link.target_url, CONFIRM_TARGET_LEN),
            clicks: link.clicks,
        };
    }

    /// Accept. Returns the key to delete, if a confirmation was pending.
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DeleteConfirm::Confirming { key, .. } => Some(key),
            DeleteConfirm::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirm::Idle;
    }
}
