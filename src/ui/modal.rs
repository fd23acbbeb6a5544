//! Create/edit popup rendering.

use crate::app::App;
use crate::modal::ModalField;
use crate::ui::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Render the popup if it is open.
///
/// The active toggle is only drawn when editing. An invalid URL field is
/// drawn in red until the next keystroke.
pub fn render_modal(app: &App, area: Rect, buf: &mut Buffer) {
    let modal = &app.modal;
    if !modal.is_open() {
        return;
    }

    let popup_area = centered_rect(70, 40, area);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title(modal.title())
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Cyan));
    block.render(popup_area, buf);

    let form = &modal.form;
    let url_focused = form.focus == ModalField::TargetUrl;
    let url_color = if form.invalid {
        Color::Red
    } else if url_focused {
        Color::White
    } else {
        Color::Gray
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Target URL",
            Style::default().fg(if url_focused { Color::Yellow } else { Color::DarkGray }),
        )),
        Line::from(vec![
            Span::styled(&form.target_url, Style::default().fg(url_color)),
            Span::styled(
                if url_focused { "_" } else { "" },
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];

    if modal.shows_active_toggle() {
        let active_focused = form.focus == ModalField::Active;
        lines.push(Line::from(vec![
            Span::styled(
                "Status: ",
                Style::default().fg(if active_focused { Color::Yellow } else { Color::DarkGray }),
            ),
            Span::styled(
                if form.is_active { "[x] Active" } else { "[ ] Active" },
                Style::default().fg(if form.is_active { Color::Green } else { Color::Red }),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let hint = if modal.is_saving() {
        Span::styled("Saving...", Style::default().fg(Color::Yellow))
    } else if modal.shows_active_toggle() {
        Span::styled(
            "Enter: save · Tab: field · Space: toggle status · Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled("Enter: save · Esc: cancel", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(hint));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(popup_area.inner(Margin::new(2, 1)), buf);
}
