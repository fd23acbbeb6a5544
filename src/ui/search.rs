//! Search bar for the links tab.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the search bar.
///
/// The typed text is shown as-is; a trailing `…` means the table has not
/// caught up with it yet. The sort order lives in the right-hand title.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let editing = app.mode == UiMode::Search;

    let mut spans = vec![Span::styled("🔍 ", Style::default())];
    if app.search_input.is_empty() && !editing {
        spans.push(Span::styled(
            "press '/' to filter by key or URL",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            app.search_input.as_str(),
            Style::default().fg(Color::White),
        ));
    }
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    if app.search_pending() {
        spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
    }

    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let sort = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            app.sort_mode.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" (s) ", Style::default().fg(Color::DarkGray)),
    ]);

    Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Search ")
                .title_top(sort.right_aligned()),
        )
        .render(area, buf);
}
