//! Shortlink TUI - Terminal admin for a URL-shortening service.
//!
//! Main entry point and event loop for the application.

mod api;
mod app;
mod clipboard;
mod config;
mod confirm;
mod debounce;
mod dispatch;
mod input;
mod logging;
mod modal;
mod notify;
mod pipeline;
mod ui;

use api::{LinkApi, ShortenerClient};
use app::{App, Tab, UiMode};
use clipboard::SystemClipboard;
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dispatch::{ApiEvent, Dispatcher};
use input::Flow;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, starts logging, kicks off the first link load and
/// runs the event loop until the user quits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(None)?;
    let _log_guard = logging::init_logging(&config)?;
    tracing::info!(api = %config.api_base_url, "starting");

    match Config::default_config_path() {
        Ok(path) if !path.exists() => {
            if let Err(e) = config.save(Some(&path)) {
                tracing::warn!(error = %e, "could not write default config");
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "no config directory"),
    }

    let api: Arc<dyn LinkApi> = Arc::new(ShortenerClient::new(&config)?);
    let (mut dispatcher, mut events) = Dispatcher::new(api, Box::new(SystemClipboard::default()));

    let mut app = App::new(&config);
    dispatcher.dispatch(app.request_reload());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut dispatcher, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Lays out the tab bar, the active tab and the key hint line, then draws
/// any open popup and the current toast on top.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Active tab
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    ui::render_tabs(app, chunks[0], f.buffer_mut());

    match app.active_tab {
        Tab::Links => {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Search bar
                    Constraint::Min(0),    // Table
                ])
                .split(chunks[1]);
            ui::render_search(app, body[0], f.buffer_mut());
            ui::render_table(app, body[1], f.buffer_mut());
        }
        Tab::Shorten => ui::render_shorten(app, chunks[1], f.buffer_mut()),
    }

    let hint = match (app.active_tab, app.mode) {
        (Tab::Links, UiMode::List) => {
            "q: quit · Tab: shorten · /: search · s: sort · n: new · e: edit · d: delete · y: copy · r: reload"
        }
        (Tab::Links, UiMode::Search) => "Type to filter · Enter/Esc: done",
        (Tab::Shorten, _) => "Enter: shorten · Ctrl-Y: copy · Esc: clear · Tab: links",
    };
    f.render_widget(
        Paragraph::new(Line::from(hint)).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );

    ui::render_modal(app, area, f.buffer_mut());
    ui::render_confirm(app, area, f.buffer_mut());
    ui::render_notification(app, area, f.buffer_mut());
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `dispatcher` - Runs commands produced by the app
/// * `events` - Completions of dispatched commands
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Polls the terminal with a short timeout so request completions, the
/// search debounce and toast expiry are picked up without user input.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    events: &mut UnboundedReceiver<ApiEvent>,
) -> anyhow::Result<()> {
    let mut commands = Vec::new();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key, Instant::now(), &mut commands) == Flow::Quit {
                        break;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }
        dispatcher.dispatch_all(commands.drain(..));

        while let Ok(event) = events.try_recv() {
            let follow_ups = app.handle_api_event(event);
            dispatcher.dispatch_all(follow_ups);
        }

        app.tick(Instant::now());
    }

    Ok(())
}
