//! Delete confirmation popup.

use crate::app::App;
use crate::confirm::DeleteConfirm;
use crate::ui::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

pub fn render_confirm(app: &App, area: Rect, buf: &mut Buffer) {
    let DeleteConfirm::Confirming {
        key,
        target,
        clicks,
    } = &app.confirm
    else {
        return;
    };

    let popup_area = centered_rect(65, 45, area);
    Clear.render(popup_area, buf);

    Block::default()
        .title("Delete link?")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Red))
        .render(popup_area, buf);

    let label = Style::default().fg(Color::DarkGray);
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Code: ", label),
            Span::styled(
                key.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("URL: ", label),
            Span::styled(target.as_str(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("Clicks: ", label),
            Span::styled(clicks.to_string(), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "⚠ This action cannot be undone.",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter: delete · n/Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(popup_area.inner(Margin::new(2, 1)), buf);
}
