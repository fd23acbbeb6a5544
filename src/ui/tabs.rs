//! Header bar: screen tabs plus a load indicator.

use crate::app::{App, LoadState, Tab};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs, Widget},
};

const TAB_TITLES: [&str; 2] = ["Links", "Shorten"];

fn tab_index(tab: Tab) -> usize {
    match tab {
        Tab::Links => 0,
        Tab::Shorten => 1,
    }
}

/// Right-hand header text describing the latest load.
fn load_indicator(app: &App) -> Line<'static> {
    match &app.load_state {
        LoadState::Loading => Line::styled("⏳ loading", Style::default().fg(Color::Yellow)),
        LoadState::Failed(_) => Line::styled("● offline", Style::default().fg(Color::Red)),
        LoadState::Idle => Line::styled(
            format!("● {} links", app.links.len()),
            Style::default().fg(Color::Green),
        ),
    }
}

/// Render the header.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Shortlink admin")
        .title_top(load_indicator(app).right_aligned());

    Tabs::new(TAB_TITLES)
        .select(tab_index(app.active_tab))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│")
        .block(block)
        .render(area, buf);
}
