//! Links table rendering.
//!
//! Displays the derived link list with selection highlighting, or a single
//! placeholder row while loading, after a failed load, or when nothing
//! matches.

use crate::api::Link;
use crate::app::{App, LoadState};
use crate::ui::{TABLE_TARGET_LEN, display_short_url, status_label, truncate_text};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};

/// Text shown instead of rows, if any.
///
/// # Returns
/// * `Option<(String, Color)>` - Placeholder message and color, or None
///   when there are rows to draw
pub fn placeholder(app: &App) -> Option<(String, Color)> {
    match &app.load_state {
        LoadState::Loading => Some(("⏳ Loading links...".to_string(), Color::Yellow)),
        LoadState::Failed(msg) => Some((
            format!("❌ Failed to load links: {}  (press 'r' to retry)", msg),
            Color::Red,
        )),
        LoadState::Idle if app.view.is_empty() => {
            let mut text = "📭 No links found".to_string();
            if !app.search_query.is_empty() {
                text.push_str(&format!(" for \"{}\"", app.search_query));
            }
            Some((text, Color::Gray))
        }
        LoadState::Idle => None,
    }
}

fn link_row<'a>(app: &App, link: &'a Link) -> Row<'a> {
    let short = app.short_url_for(link);
    let (status, status_color) = status_label(link.is_active);
    Row::new(vec![
        Cell::from(Span::styled(
            link.key.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Cell::from(truncate_text(&link.target_url, TABLE_TARGET_LEN))
            .style(Style::default().fg(Color::Cyan)),
        Cell::from(display_short_url(&short).to_string()).style(Style::default().fg(Color::Blue)),
        Cell::from(link.clicks.to_string()).style(Style::default().fg(Color::Magenta)),
        Cell::from(status).style(Style::default().fg(status_color)),
        Cell::from(link.format_created_at()).style(Style::default().fg(Color::Gray)),
    ])
}

/// Render the links table.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// The title shows how many links pass the filter out of the total.
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let title = format!(
        "Links ({}/{}) · n:new e:edit d:delete y:copy r:reload",
        app.view.len(),
        app.links.len()
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    if let Some((text, color)) = placeholder(app) {
        let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .block(block)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true });
        Widget::render(paragraph, area, buf);
        return;
    }

    let header = Row::new(["Key", "Target", "Short URL", "Clicks", "Status", "Created"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app.view.iter().map(|link| link_row(app, link)).collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(20),
        Constraint::Length(28),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index.min(app.view.len().saturating_sub(1))));

    StatefulWidget::render(table, area, buf, &mut state);
}
