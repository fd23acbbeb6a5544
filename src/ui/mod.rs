//! UI components module.
//!
//! Contains ratatui widgets for the links table, popups and the shorten
//! screen, plus the small formatting helpers they share.

pub mod confirm;
pub mod modal;
pub mod notification;
pub mod search;
pub mod shorten;
pub mod table;
pub mod tabs;

pub use confirm::render_confirm;
pub use modal::render_modal;
pub use notification::render_notification;
pub use search::render_search;
pub use shorten::render_shorten;
pub use table::render_table;
pub use tabs::render_tabs;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

/// Characters of the target URL shown in the table.
pub const TABLE_TARGET_LEN: usize = 50;

/// Build the public short URL for a key.
///
/// # Arguments
/// * `base` - Public origin (e.g. `https://sho.rt/`)
/// * `key` - Short code
///
/// # Returns
/// * `String` - `base` without trailing slashes, then `/key`
pub fn short_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

/// Short URL without its scheme, for display.
pub fn display_short_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Cap text at `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Status badge label and color.
pub fn status_label(is_active: bool) -> (&'static str, Color) {
    if is_active {
        ("● Active", Color::Green)
    } else {
        ("○ Inactive", Color::Red)
    }
}

/// Create a rectangle centered in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
