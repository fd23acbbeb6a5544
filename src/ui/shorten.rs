//! Quick-shorten screen.
//!
//! One input, one button's worth of behaviour: paste a long URL, press
//! Enter, get the short one.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Render the shorten screen.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_shorten(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(4), // Result
            Constraint::Min(0),    // Help
        ])
        .split(area);

    let state = &app.shorten;
    let input = Paragraph::new(Line::from(vec![
        Span::styled(&state.input, Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .title(if state.submitting {
                "Long URL · Shortening..."
            } else {
                "Long URL · Enter to shorten"
            })
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow)),
    );
    input.render(chunks[0], buf);

    let result_line = match &state.result {
        Some(url) => Line::from(vec![
            Span::styled("🔗 ", Style::default()),
            Span::styled(
                url.as_str(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   (Ctrl-Y to copy)", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            "Your short link will appear here",
            Style::default().fg(Color::DarkGray),
        )),
    };
    Paragraph::new(result_line)
        .block(Block::default().title("Short link").borders(Borders::ALL))
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    Paragraph::new(Line::from(Span::styled(
        "Esc: clear · Tab: back to links · Ctrl-C: quit",
        Style::default().fg(Color::DarkGray),
    )))
    .render(chunks[2], buf);
}
