//! Keyboard and mouse handling.
//!
//! Maps terminal events onto `App` state changes. Effects come back as
//! `Command`s for the dispatcher.

use crate::app::{App, Tab, UiMode};
use crate::dispatch::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::time::Instant;

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Handle one key press.
///
/// # Arguments
/// * `app` - Application state
/// * `key` - Pressed key
/// * `now` - Current time, for the search debounce
/// * `commands` - Receives any effects to dispatch
///
/// # Details
/// Popups take priority: the delete confirmation, then the edit popup,
/// then the active tab.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant, commands: &mut Vec<Command>) -> Flow {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    if app.confirm.is_active() {
        handle_confirm_key(app, key, commands);
        return Flow::Continue;
    }

    if app.modal.is_open() {
        handle_modal_key(app, key, commands);
        return Flow::Continue;
    }

    match app.active_tab {
        Tab::Links => match app.mode {
            UiMode::List => handle_list_key(app, key, commands),
            UiMode::Search => {
                handle_search_key(app, key, now);
                Flow::Continue
            }
        },
        Tab::Shorten => {
            handle_shorten_key(app, key, commands);
            Flow::Continue
        }
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent, commands: &mut Vec<Command>) -> Flow {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
        KeyCode::Tab => app.switch_tab(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('/') => app.mode = UiMode::Search,
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('s') => app.cycle_sort_mode(),
        KeyCode::Char('n') => app.open_create(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.begin_delete_selected(),
        KeyCode::Char('y') => commands.extend(app.copy_selected()),
        KeyCode::Char('r') => {
            if !app.is_loading() {
                commands.push(app.request_reload());
            }
        }
        _ => {}
    }
    Flow::Continue
}

/// The character a key types, if it is plain text. Shift is fine;
/// Ctrl/Alt chords are shortcuts and never type.
fn typed_char(key: &KeyEvent) -> Option<char> {
    let chord = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char(c) if !chord => Some(c),
        _ => None,
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, now: Instant) {
    if let Some(c) = typed_char(&key) {
        app.add_search_char(c, now);
        return;
    }
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.finish_search(),
        KeyCode::Backspace => app.remove_search_char(now),
        _ => {}
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent, commands: &mut Vec<Command>) {
    use crate::modal::ModalField;

    match key.code {
        KeyCode::Esc => app.cancel_modal(),
        KeyCode::Enter => commands.extend(app.submit_modal()),
        KeyCode::Tab | KeyCode::BackTab => app.modal.toggle_focus(),
        KeyCode::Char(' ') if app.modal.form.focus == ModalField::Active => {
            app.modal.toggle_active()
        }
        KeyCode::Backspace => app.modal.pop_char(),
        KeyCode::Char(_) => {
            if let Some(c) = typed_char(&key) {
                app.modal.push_char(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent, commands: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            commands.extend(app.confirm_delete())
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn handle_shorten_key(app: &mut App, key: KeyEvent, commands: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            commands.extend(app.copy_shortened())
        }
        KeyCode::Tab => app.switch_tab(),
        KeyCode::Enter => commands.extend(app.submit_shorten()),
        KeyCode::Esc => app.clear_shorten(),
        KeyCode::Backspace => {
            app.shorten.input.pop();
        }
        KeyCode::Char(_) => {
            if let Some(c) = typed_char(&key) {
                app.shorten.input.push(c);
            }
        }
        _ => {}
    }
}

/// Handle mouse scrolling over the table.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.active_tab != Tab::Links || app.modal.is_open() || app.confirm.is_active() {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}
