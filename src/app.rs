//! Application state management.
//!
//! Manages the link list, the derived view, selection, search, popups and
//! notifications. State changes return `Command`s instead of doing I/O.

use crate::api::{ApiError, Link};
use crate::config::Config;
use crate::confirm::DeleteConfirm;
use crate::debounce::Debounce;
use crate::dispatch::{ApiEvent, ApiRequest, Command, CreateOrigin};
use crate::modal::{Modal, SubmitRequest};
use crate::notify::{Notifier, Severity};
use crate::pipeline::{SortMode, derive_view};
use crate::ui::short_url;
use std::cmp;
use std::time::Instant;

/// Input mode on the links tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal table navigation
    List,
    /// Typing into the search box
    Search,
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Admin table
    Links,
    /// Quick-shorten widget
    Shorten,
}

/// Progress of the latest list load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Failed(String),
}

/// Quick-shorten tab state.
#[derive(Debug, Default)]
pub struct ShortenState {
    pub input: String,
    /// Last short URL produced
    pub result: Option<String>,
    pub submitting: bool,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// All links, replaced wholesale on every load
    pub links: Vec<Link>,
    /// Filtered and sorted copy of `links`
    pub view: Vec<Link>,
    /// Currently selected row (in `view`)
    pub selected_index: usize,
    /// Search term the view is filtered by
    pub search_query: String,
    /// What is typed in the search box; applied after the debounce
    pub search_input: String,
    pub sort_mode: SortMode,
    pub mode: UiMode,
    pub active_tab: Tab,
    pub modal: Modal,
    pub confirm: DeleteConfirm,
    pub load_state: LoadState,
    pub notifier: Notifier,
    pub shorten: ShortenState,
    /// Origin for building short URLs
    pub public_base: String,
    search_debounce: Debounce,
    /// Sequence number of the newest list request
    load_seq: u64,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `config` - Loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            links: Vec::new(),
            view: Vec::new(),
            selected_index: 0,
            search_query: String::new(),
            search_input: String::new(),
            sort_mode: config.default_sort,
            mode: UiMode::List,
            active_tab: Tab::Links,
            modal: Modal::default(),
            confirm: DeleteConfirm::default(),
            load_state: LoadState::Idle,
            notifier: Notifier::new(config.notification_ttl()),
            shorten: ShortenState::default(),
            public_base: config.public_base().to_string(),
            search_debounce: Debounce::new(config.search_debounce()),
            load_seq: 0,
        }
    }

    /// Set the list of links and recompute the view.
    pub fn set_links(&mut self, links: Vec<Link>) {
        self.links = links;
        self.refresh_view();
    }

    /// Recompute the view from the full list, term and sort mode.
    pub fn refresh_view(&mut self) {
        self.view = derive_view(&self.links, &self.search_query, self.sort_mode);
        self.selected_index = cmp::min(self.selected_index, self.view.len().saturating_sub(1));
    }

    /// Start a full reload.
    ///
    /// Each request gets a fresh sequence number; only the newest one's
    /// answer is applied.
    pub fn request_reload(&mut self) -> Command {
        self.load_seq += 1;
        self.load_state = LoadState::Loading;
        Command::Api(ApiRequest::LoadLinks { seq: self.load_seq })
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Advance timers: fire the search debounce and expire notifications.
    pub fn tick(&mut self, now: Instant) {
        if self.search_debounce.fire(now) {
            self.apply_search();
        }
        self.notifier.tick(now);
    }

    fn apply_search(&mut self) {
        if self.search_query != self.search_input {
            self.search_query = self.search_input.clone();
            self.selected_index = 0;
            self.refresh_view();
        }
    }

    /// Add a character to the search box.
    ///
    /// The view is not re-filtered until the debounce delay passes.
    pub fn add_search_char(&mut self, ch: char, now: Instant) {
        if self.mode == UiMode::Search {
            self.search_input.push(ch);
            self.search_debounce.schedule(now);
        }
    }

    /// Remove the last character from the search box.
    pub fn remove_search_char(&mut self, now: Instant) {
        if self.mode == UiMode::Search {
            self.search_input.pop();
            self.search_debounce.schedule(now);
        }
    }

    /// Typed search text that has not been applied yet.
    pub fn search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    /// Leave search mode, applying whatever is typed right away.
    pub fn finish_search(&mut self) {
        self.search_debounce.cancel();
        self.apply_search();
        self.mode = UiMode::List;
    }

    /// Clear the search box and the filter.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.finish_search();
    }

    /// Cycle to next sort mode and re-sort immediately.
    pub fn cycle_sort_mode(&mut self) {
        self.sort_mode = self.sort_mode.next();
        self.refresh_view();
        self.notify(format!("Sort: {}", self.sort_mode.label()), Severity::Info);
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if self.view.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.view.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.view.len();
    }

    pub fn selected_link(&self) -> Option<&Link> {
        self.view.get(self.selected_index)
    }

    /// Switch to a different tab.
    pub fn switch_tab(&mut self) {
        self.active_tab = match self.active_tab {
            Tab::Links => Tab::Shorten,
            Tab::Shorten => Tab::Links,
        };
        self.mode = UiMode::List;
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    /// Short URL for a link under the configured public origin.
    pub fn short_url_for(&self, link: &Link) -> String {
        short_url(&self.public_base, &link.key)
    }

    // ---- create / edit popup ----

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    /// Open the edit popup for the selected row.
    pub fn open_edit_selected(&mut self) {
        let Some(key) = self.selected_link().map(|l| l.key.clone()) else {
            return;
        };
        if let Some(link) = self.links.iter().find(|l| l.key == key) {
            self.modal.open_edit(link);
        }
    }

    pub fn cancel_modal(&mut self) {
        self.modal.close();
    }

    /// Validate and send the popup form.
    ///
    /// # Returns
    /// * `Option<Command>` - The request to dispatch, or None when the form
    ///   was rejected locally (nothing is sent in that case)
    pub fn submit_modal(&mut self) -> Option<Command> {
        match self.modal.submit() {
            Ok(Some(SubmitRequest::Create { target_url, save_id })) => {
                Some(Command::Api(ApiRequest::Create {
                    target_url,
                    origin: CreateOrigin::Modal { save_id },
                }))
            }
            Ok(Some(SubmitRequest::Update {
                key,
                target_url,
                is_active,
                save_id,
            })) => Some(Command::Api(ApiRequest::Update {
                key,
                target_url,
                is_active,
                save_id,
            })),
            Ok(None) => None,
            Err(e) => {
                self.notify(e.to_string(), Severity::Warning);
                None
            }
        }
    }

    // ---- delete confirmation ----

    pub fn begin_delete_selected(&mut self) {
        let Some(key) = self.selected_link().map(|l| l.key.clone()) else {
            return;
        };
        if let Some(link) = self.links.iter().find(|l| l.key == key) {
            self.confirm.begin(link);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Command> {
        self.confirm
            .confirm()
            .map(|key| Command::Api(ApiRequest::Delete { key }))
    }

    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    // ---- clipboard ----

    pub fn copy_selected(&self) -> Option<Command> {
        self.selected_link()
            .map(|link| Command::Copy(self.short_url_for(link)))
    }

    // ---- quick shorten ----

    /// Submit the quick-shorten input.
    ///
    /// Only emptiness is checked here; the backend adds a missing scheme.
    pub fn submit_shorten(&mut self) -> Option<Command> {
        if self.shorten.submitting {
            return None;
        }
        let target_url = self.shorten.input.trim().to_string();
        if target_url.is_empty() {
            self.notify("Please enter a URL first.", Severity::Error);
            return None;
        }
        self.shorten.submitting = true;
        self.shorten.result = None;
        Some(Command::Api(ApiRequest::Create {
            target_url,
            origin: CreateOrigin::Shorten,
        }))
    }

    pub fn copy_shortened(&mut self) -> Option<Command> {
        match &self.shorten.result {
            Some(url) => Some(Command::Copy(url.clone())),
            None => {
                self.notify("Nothing to copy yet", Severity::Info);
                None
            }
        }
    }

    pub fn clear_shorten(&mut self) {
        self.shorten.input.clear();
        self.shorten.result = None;
    }

    // ---- completions ----

    /// Apply the outcome of a dispatched command.
    ///
    /// # Returns
    /// * `Vec<Command>` - Follow-up work; every successful mutation asks for
    ///   a full reload
    pub fn handle_api_event(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::Loaded { seq, result } => {
                if seq != self.load_seq {
                    tracing::debug!(seq, latest = self.load_seq, "dropping stale list response");
                    return Vec::new();
                }
                match result {
                    Ok(links) => {
                        let count = links.len();
                        self.load_state = LoadState::Idle;
                        self.set_links(links);
                        self.notify(format!("Loaded {} links", count), Severity::Success);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to load links");
                        self.load_state = LoadState::Failed(e.to_string());
                        self.notify("Failed to load links", Severity::Error);
                    }
                }
                Vec::new()
            }
            ApiEvent::Created {
                origin: CreateOrigin::Modal { save_id },
                result,
            } => match result {
                Ok(link) => {
                    tracing::info!(key = %link.key, "link created");
                    self.modal.save_succeeded(save_id);
                    self.notify("Link created", Severity::Success);
                    vec![self.request_reload()]
                }
                Err(e) => {
                    self.save_failed(save_id, &e);
                    Vec::new()
                }
            },
            ApiEvent::Created {
                origin: CreateOrigin::Shorten,
                result,
            } => {
                self.shorten.submitting = false;
                match result {
                    Ok(link) => {
                        tracing::info!(key = %link.key, "link shortened");
                        let url = link
                            .full_short_url
                            .clone()
                            .unwrap_or_else(|| self.short_url_for(&link));
                        self.shorten.result = Some(url);
                        self.shorten.input.clear();
                        self.notify("Link shortened!", Severity::Success);
                        vec![self.request_reload()]
                    }
                    Err(e) => {
                        self.notify(e.to_string(), Severity::Error);
                        Vec::new()
                    }
                }
            }
            ApiEvent::Updated {
                key,
                save_id,
                result,
            } => match result {
                Ok(_) => {
                    tracing::info!(%key, "link updated");
                    self.modal.save_succeeded(save_id);
                    self.notify("Link updated", Severity::Success);
                    vec![self.request_reload()]
                }
                Err(e) => {
                    self.save_failed(save_id, &e);
                    Vec::new()
                }
            },
            ApiEvent::Deleted { key, result } => match result {
                Ok(()) => {
                    tracing::info!(%key, "link deleted");
                    self.notify("Link deleted", Severity::Success);
                    vec![self.request_reload()]
                }
                Err(e) => {
                    tracing::error!(%key, error = %e, "failed to delete link");
                    self.notify(format!("Failed to delete link: {}", e), Severity::Error);
                    Vec::new()
                }
            },
            ApiEvent::Copied(result) => {
                match result {
                    Ok(_) => self.notify("Link copied to clipboard", Severity::Success),
                    Err(e) => self.notify(e.to_string(), Severity::Error),
                }
                Vec::new()
            }
        }
    }

    fn save_failed(&mut self, save_id: u64, error: &ApiError) {
        tracing::error!(save_id, error = %error, "failed to save link");
        self.modal.save_failed(save_id);
        self.notify(format!("Error: {}", error), Severity::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeApi, Request};
    use crate::dispatch::execute;
    use crate::modal::ModalState;
    use std::collections::VecDeque;
    use std::time::Duration;

    fn create_test_link(key: &str, clicks: u64, created_at: &str) -> Link {
        Link {
            clicks,
            created_at: Some(created_at.to_string()),
            ..Link::new(key, format!("https://example.com/{}", key))
        }
    }

    fn test_app() -> App {
        App::new(&Config::default())
    }

    /// Run commands against the fake, feeding follow-ups back in, the way
    /// the UI loop does.
    async fn run(app: &mut App, api: &FakeApi, commands: impl IntoIterator<Item = Command>) {
        let mut queue: VecDeque<Command> = commands.into_iter().collect();
        while let Some(command) = queue.pop_front() {
            let event = match command {
                Command::Api(request) => execute(api, request).await,
                Command::Copy(text) => ApiEvent::Copied(Ok(text)),
            };
            queue.extend(app.handle_api_event(event));
        }
    }

    async fn loaded_app(api: &FakeApi) -> App {
        let mut app = test_app();
        let reload = app.request_reload();
        run(&mut app, api, [reload]).await;
        app
    }

    fn type_into_modal(app: &mut App, text: &str) {
        for c in text.chars() {
            app.modal.push_char(c);
        }
    }

    #[test]
    fn test_app_new() {
        let app = test_app();
        assert!(app.links.is_empty());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.active_tab, Tab::Links);
        assert_eq!(app.sort_mode, SortMode::DateDesc);
        assert_eq!(app.load_state, LoadState::Idle);
    }

    #[test]
    fn test_app_uses_configured_sort() {
        let config = Config {
            default_sort: SortMode::AlphaAsc,
            ..Config::default()
        };
        assert_eq!(App::new(&config).sort_mode, SortMode::AlphaAsc);
    }

    #[test]
    fn test_app_set_links_derives_view() {
        let mut app = test_app();
        app.set_links(vec![
            create_test_link("abc", 5, "2024-01-01"),
            create_test_link("xyz", 2, "2024-06-01"),
        ]);
        assert_eq!(app.links.len(), 2);
        let keys: Vec<_> = app.view.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, ["xyz", "abc"]);
    }

    #[test]
    fn test_search_is_debounced() {
        let mut app = test_app();
        app.set_links(vec![
            create_test_link("abc", 5, "2024-01-01"),
            create_test_link("xyz", 2, "2024-06-01"),
        ]);
        app.mode = UiMode::Search;
        let t0 = Instant::now();
        app.add_search_char('x', t0);
        app.add_search_char('y', t0 + Duration::from_millis(100));
        app.tick(t0 + Duration::from_millis(350));
        assert_eq!(app.view.len(), 2, "still inside the debounce window");

        app.tick(t0 + Duration::from_millis(400));
        assert_eq!(app.search_query, "xy");
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.view[0].key, "xyz");
    }

    #[test]
    fn test_finish_search_applies_immediately_and_clear_resets() {
        let mut app = test_app();
        app.set_links(vec![
            create_test_link("abc", 5, "2024-01-01"),
            create_test_link("xyz", 2, "2024-06-01"),
        ]);
        app.mode = UiMode::Search;
        app.add_search_char('B', Instant::now());
        app.finish_search();
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.view[0].key, "abc");

        app.clear_search();
        assert_eq!(app.view.len(), 2);
    }

    #[test]
    fn test_search_chars_ignored_outside_search_mode() {
        let mut app = test_app();
        app.add_search_char('x', Instant::now());
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn test_cycle_sort_mode_resorts() {
        let mut app = test_app();
        app.set_links(vec![
            create_test_link("abc", 5, "2024-01-01"),
            create_test_link("xyz", 2, "2024-06-01"),
        ]);
        app.cycle_sort_mode();
        assert_eq!(app.sort_mode, SortMode::DateAsc);
        assert_eq!(app.view[0].key, "abc");
        assert_eq!(app.notifier.current().unwrap().message, "Sort: Oldest first");
    }

    #[test]
    fn test_app_move_selection() {
        let mut app = test_app();
        app.set_links(vec![
            create_test_link("a", 0, "2024-01-03"),
            create_test_link("b", 0, "2024-01-02"),
            create_test_link("c", 0, "2024-01-01"),
        ]);
        assert_eq!(app.selected_index, 0);

        app.move_down();
        assert_eq!(app.selected_index, 1);

        app.move_up();
        assert_eq!(app.selected_index, 0);

        app.move_up(); // Should wrap to end
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.selected_link().unwrap().key, "c");
    }

    #[test]
    fn test_selection_clamped_when_view_shrinks() {
        let mut app = test_app();
        app.set_links(vec![
            create_test_link("a", 0, "2024-01-03"),
            create_test_link("b", 0, "2024-01-02"),
        ]);
        app.selected_index = 1;
        app.set_links(vec![create_test_link("a", 0, "2024-01-03")]);
        assert_eq!(app.selected_index, 0);
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let app = loaded_app(&api).await;
        assert_eq!(app.links.len(), 1);
        assert_eq!(app.load_state, LoadState::Idle);
        assert_eq!(app.notifier.current().unwrap().message, "Loaded 1 links");
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_links() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let mut app = loaded_app(&api).await;

        api.fail_next(500, r#"{"detail": "database is down"}"#);
        let reload = app.request_reload();
        run(&mut app, &api, [reload]).await;

        assert_eq!(app.load_state, LoadState::Failed("database is down".to_string()));
        assert_eq!(app.links.len(), 1);
        assert_eq!(app.notifier.current().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_stale_reload_is_ignored() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let mut app = test_app();
        let first = app.request_reload();
        let second = app.request_reload();

        let Command::Api(second_request) = second else {
            panic!("expected api command")
        };
        let fresh = execute(&api, second_request).await;
        assert!(app.handle_api_event(fresh).is_empty());
        assert_eq!(app.links.len(), 1);

        // The older response resolves last and must not win.
        let Command::Api(first_request) = first else {
            panic!("expected api command")
        };
        let stale = ApiEvent::Loaded {
            seq: match first_request {
                ApiRequest::LoadLinks { seq } => seq,
                _ => unreachable!(),
            },
            result: Ok(Vec::new()),
        };
        app.handle_api_event(stale);
        assert_eq!(app.links.len(), 1);
    }

    #[tokio::test]
    async fn test_create_then_reload_adds_link_once() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let mut app = loaded_app(&api).await;

        app.open_create();
        type_into_modal(&mut app, "https://www.rust-lang.org/learn");
        let submit = app.submit_modal().expect("valid form");
        run(&mut app, &api, [submit]).await;

        let matching: Vec<_> = app
            .links
            .iter()
            .filter(|l| l.target_url == "https://www.rust-lang.org/learn")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(app.links.len(), 2);
        assert_eq!(app.modal.state, ModalState::Closed);
        assert_eq!(
            api.requests(),
            [
                Request::List,
                Request::Create("https://www.rust-lang.org/learn".to_string()),
                Request::List,
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_sends_nothing() {
        let api = FakeApi::default();
        let mut app = loaded_app(&api).await;

        for input in ["", "   ", "not a url", "www.example.com"] {
            app.open_create();
            type_into_modal(&mut app, input);
            assert!(app.submit_modal().is_none(), "{input:?}");
            assert!(app.modal.form.invalid);
            assert_eq!(app.notifier.current().unwrap().severity, Severity::Warning);
        }
        assert_eq!(api.requests(), [Request::List]);
    }

    #[tokio::test]
    async fn test_edit_updates_and_reloads() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let mut app = loaded_app(&api).await;

        app.open_edit_selected();
        app.modal.toggle_active();
        let submit = app.submit_modal().expect("valid form");
        run(&mut app, &api, [submit]).await;

        assert!(!app.links[0].is_active);
        assert_eq!(app.modal.state, ModalState::Closed);
        assert_eq!(
            api.requests()[1],
            Request::Update("abc".to_string(), "https://example.com/abc".to_string(), false)
        );
        assert_eq!(api.requests().last(), Some(&Request::List));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_modal_open() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let mut app = loaded_app(&api).await;

        app.open_edit_selected();
        api.fail_next(422, "");
        let submit = app.submit_modal().expect("valid form");
        run(&mut app, &api, [submit]).await;

        assert_eq!(app.modal.state, ModalState::Edit { key: "abc".to_string() });
        assert!(!app.modal.is_saving());
        let shown = app.notifier.current().unwrap();
        assert_eq!(shown.message, "Error: Request failed (HTTP 422)");
        // No reload after a failed mutation.
        assert_eq!(api.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_delete_sends_nothing() {
        let api = FakeApi::with_links(vec![
            create_test_link("abc", 5, "2024-01-01"),
            create_test_link("xyz", 2, "2024-06-01"),
        ]);
        let mut app = loaded_app(&api).await;
        let before = app.links.clone();

        app.begin_delete_selected();
        assert!(app.confirm.is_active());
        app.cancel_delete();
        assert!(!app.confirm.is_active());
        assert!(app.confirm_delete().is_none());

        assert_eq!(app.links, before);
        assert_eq!(api.requests(), [Request::List]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_and_reloads() {
        let api = FakeApi::with_links(vec![
            create_test_link("abc", 5, "2024-01-01"),
            create_test_link("xyz", 2, "2024-06-01"),
        ]);
        let mut app = loaded_app(&api).await;
        // Newest first: "xyz" is selected.
        app.begin_delete_selected();
        let delete = app.confirm_delete().expect("pending confirmation");
        run(&mut app, &api, [delete]).await;

        assert_eq!(app.links.len(), 1);
        assert_eq!(app.links[0].key, "abc");
        assert_eq!(
            api.requests(),
            [Request::List, Request::Delete("xyz".to_string()), Request::List]
        );
    }

    #[tokio::test]
    async fn test_shorten_flow() {
        let api = FakeApi::default();
        let mut app = loaded_app(&api).await;
        app.switch_tab();
        assert_eq!(app.active_tab, Tab::Shorten);

        assert!(app.submit_shorten().is_none());
        assert_eq!(app.notifier.current().unwrap().message, "Please enter a URL first.");

        app.shorten.input = "example.org/some/long/path".to_string();
        let submit = app.submit_shorten().expect("non-empty input");
        assert!(app.shorten.submitting);
        run(&mut app, &api, [submit]).await;

        assert!(!app.shorten.submitting);
        assert!(app.shorten.input.is_empty());
        let result = app.shorten.result.clone().unwrap();
        assert!(result.starts_with("http://localhost:8000/"));
        assert_eq!(app.links.len(), 1);

        let copy = app.copy_shortened().unwrap();
        assert_eq!(copy, Command::Copy(result));
    }

    #[tokio::test]
    async fn test_copy_selected_uses_public_base() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let config = Config {
            public_base_url: Some("https://sho.rt/".to_string()),
            ..Config::default()
        };
        let mut app = App::new(&config);
        let reload = app.request_reload();
        run(&mut app, &api, [reload]).await;

        let copy = app.copy_selected().unwrap();
        assert_eq!(copy, Command::Copy("https://sho.rt/abc".to_string()));
        run(&mut app, &api, [copy]).await;
        assert_eq!(app.notifier.current().unwrap().message, "Link copied to clipboard");
    }

    fn api_request(command: Command) -> ApiRequest {
        match command {
            Command::Api(request) => request,
            other => panic!("expected api command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_abandoned_create_does_not_close_newer_popup() {
        let api = FakeApi::default();
        let mut app = loaded_app(&api).await;

        app.open_create();
        type_into_modal(&mut app, "https://first.example");
        let first = api_request(app.submit_modal().expect("valid form"));
        app.cancel_modal();

        app.open_create();
        type_into_modal(&mut app, "https://second.example");
        let second = api_request(app.submit_modal().expect("valid form"));

        let follow_ups = app.handle_api_event(execute(&api, first).await);
        assert_eq!(follow_ups.len(), 1, "the list still reloads");
        assert_eq!(app.modal.state, ModalState::Create);
        assert_eq!(app.modal.form.target_url, "https://second.example");
        assert!(app.modal.is_saving());

        api.fail_next(500, r#"{"detail": "disk full"}"#);
        app.handle_api_event(execute(&api, second).await);
        assert_eq!(app.modal.state, ModalState::Create);
        assert_eq!(app.modal.form.target_url, "https://second.example");
        assert!(!app.modal.is_saving());
        assert_eq!(app.notifier.current().unwrap().message, "Error: disk full");
    }

    #[tokio::test]
    async fn test_abandoned_failure_keeps_newer_save_pending() {
        let api = FakeApi::with_links(vec![create_test_link("abc", 5, "2024-01-01")]);
        let mut app = loaded_app(&api).await;

        app.open_edit_selected();
        let first = api_request(app.submit_modal().expect("valid form"));
        app.cancel_modal();

        app.open_edit_selected();
        app.modal.toggle_active();
        let second = api_request(app.submit_modal().expect("valid form"));

        api.fail_next(409, "");
        assert!(app.handle_api_event(execute(&api, first).await).is_empty());
        assert!(app.modal.is_saving());
        // Still waiting on the second save, so Enter sends nothing new.
        assert!(app.submit_modal().is_none());

        app.handle_api_event(execute(&api, second).await);
        assert_eq!(app.modal.state, ModalState::Closed);
    }

    #[tokio::test]
    async fn test_clipboard_failure_shows_error() {
        use crate::clipboard::memory::MemoryClipboard;
        use crate::dispatch::Dispatcher;
        use std::sync::Arc;

        let api = Arc::new(FakeApi::with_links(vec![create_test_link(
            "abc",
            5,
            "2024-01-01",
        )]));
        let mut app = loaded_app(&api).await;
        let broken = MemoryClipboard {
            broken: true,
            ..MemoryClipboard::default()
        };
        let (mut dispatcher, mut rx) = Dispatcher::new(api.clone(), Box::new(broken));

        dispatcher.dispatch(app.copy_selected().expect("a row is selected"));
        let event = rx.recv().await.unwrap();
        assert!(app.handle_api_event(event).is_empty());

        let shown = app.notifier.current().unwrap();
        assert_eq!(shown.severity, Severity::Error);
        assert_eq!(shown.message, "Could not copy to clipboard: no display");
        // The app keeps working.
        assert_eq!(app.load_state, LoadState::Idle);
        assert!(app.copy_selected().is_some());
    }
}
