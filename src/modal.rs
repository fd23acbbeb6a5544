//! Create/edit popup state.
//!
//! Holds the form contents and validates the target URL before anything
//! is sent to the backend.

use crate::api::Link;
use thiserror::Error;
use url::Url;

/// Which popup is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Create,
    Edit { key: String },
}

/// Field that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalField {
    #[default]
    TargetUrl,
    Active,
}

/// Form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub target_url: String,
    pub is_active: bool,
    /// Set when the last submit failed validation
    pub invalid: bool,
    pub focus: ModalField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            is_active: true,
            invalid: false,
            focus: ModalField::TargetUrl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    Empty,
    #[error("Invalid URL. Make sure it includes http:// or https://")]
    Malformed,
}

/// What a valid submit asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
///
/// `save_id` identifies this submit; the backend's answer must echo it to
/// affect the popup.
pub enum SubmitRequest {
    Create {
        target_url: String,
        save_id: u64,
    },
    Update {
        key: String,
        target_url: String,
        is_active: bool,
        save_id: u64,
    },
}

/// Check that the input is a well-formed absolute URL.
///
/// # Arguments
/// * `input` - Raw field contents
///
/// # Returns
/// * `Result<String, ValidationError>` - Trimmed URL or the reason it was rejected
pub fn validate_target_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    Url::parse(trimmed).map_err(|_| ValidationError::Malformed)?;
    Ok(trimmed.to_string())
}

/// Popup controller: state machine plus form.
#[derive(Debug, Default)]
pub struct Modal {
    pub state: ModalState,
    pub form: FormState,
    /// Save the open popup is waiting on
    pending_save: Option<u64>,
    /// Last save id handed out; never reused, even across popups
    last_save_id: u64,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Open with an empty form. New links are always active.
    pub fn open_create(&mut self) {
        self.state = ModalState::Create;
        self.form = FormState::default();
        self.pending_save = None;
    }

    /// Open pre-filled with an existing record.
    pub fn open_edit(&mut self, link: &Link) {
        self.state = ModalState::Edit {
            key: link.key.clone(),
        };
        self.form = FormState {
            target_url: link.target_url.clone(),
            is_active: link.is_active,
            ..FormState::default()
        };
        self.pending_save = None;
    }

    /// Close without side effects and reset the form.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.form = FormState::default();
        self.pending_save = None;
    }

    /// A submit from this popup is waiting for the backend.
    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// The active toggle is only offered when editing.
    pub fn shows_active_toggle(&self) -> bool {
        matches!(self.state, ModalState::Edit { .. })
    }

    pub fn title(&self) -> String {
        match &self.state {
            ModalState::Closed => String::new(),
            ModalState::Create => "Create new link".to_string(),
            ModalState::Edit { key } => format!("Edit: {}", key),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.form.focus == ModalField::TargetUrl {
            self.form.target_url.push(c);
            self.form.invalid = false;
        }
    }

    pub fn pop_char(&mut self) {
        if self.form.focus == ModalField::TargetUrl {
            self.form.target_url.pop();
            self.form.invalid = false;
        }
    }

    /// Move focus between the URL field and the toggle.
    pub fn toggle_focus(&mut self) {
        if !self.shows_active_toggle() {
            return;
        }
        self.form.focus = match self.form.focus {
            ModalField::TargetUrl => ModalField::Active,
            ModalField::Active => ModalField::TargetUrl,
        };
    }

    pub fn toggle_active(&mut self) {
        if self.shows_active_toggle() {
            self.form.is_active = !self.form.is_active;
        }
    }

    /// Validate the form and build the request to send.
    ///
    /// # Returns
    /// * `Ok(Some(request))` - Valid; the caller dispatches it
    /// * `Ok(None)` - Nothing to do (closed, or a save is already in flight)
    /// * `Err(e)` - Invalid input; the field is marked and nothing is sent
    pub fn submit(&mut self) -> Result<Option<SubmitRequest>, ValidationError> {
        if self.is_saving() {
            return Ok(None);
        }
        let save_id = self.last_save_id + 1;
        let request = match &self.state {
            ModalState::Closed => return Ok(None),
            ModalState::Create => {
                let target_url = self.validated()?;
                SubmitRequest::Create { target_url, save_id }
            }
            ModalState::Edit { key } => {
                let key = key.clone();
                let target_url = self.validated()?;
                SubmitRequest::Update {
                    key,
                    target_url,
                    is_active: self.form.is_active,
                    save_id,
                }
            }
        };
        self.last_save_id = save_id;
        self.pending_save = Some(save_id);
        Ok(Some(request))
    }

    fn validated(&mut self) -> Result<String, ValidationError> {
        validate_target_url(&self.form.target_url).inspect_err(|_| {
            self.form.invalid = true;
            self.form.focus = ModalField::TargetUrl;
        })
    }

    /// The backend accepted save `save_id`.
    ///
    /// Closes the popup only if it is waiting on that save. A popup the
    /// user opened after cancelling is left alone.
    pub fn save_succeeded(&mut self, save_id: u64) {
        if self.pending_save == Some(save_id) {
            self.close();
        }
    }

    /// The backend rejected save `save_id`; keep the popup and its contents.
    ///
    /// Only re-enables submitting if the popup was waiting on that save.
    pub fn save_failed(&mut self, save_id: u64) {
        if self.pending_save == Some(save_id) {
            self.pending_save = None;
        }
    }
}
