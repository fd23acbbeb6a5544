//! Toast rendering for the current notification.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Draw the toast in the top-right corner of `area`.
pub fn render_notification(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(notification) = app.notifier.current() else {
        return;
    };

    let text = format!("{} {}", notification.severity.icon(), notification.message);
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let toast_area = Rect {
        x: area.right().saturating_sub(width),
        y: area.y,
        width,
        height: 3.min(area.height),
    };

    let color = notification.severity.color();
    Clear.render(toast_area, buf);
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).bg(color))
            .style(Style::default().bg(color)),
    )
    .render(toast_area, buf);
}
