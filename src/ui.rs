// src/ui.rs

pub mod confirm;
pub mod footer;
pub mod header;
pub mod history;
pub mod settings;

use crate::app::{App, AppScreen};
use crate::chat_view::draw_chat;
use crate::errors::AquachatResult;
use crate::key_handlers::handle_key;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: App) -> AquachatResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("ui loop failed: {}", err);
    }
    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AquachatResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // crossterm reads block, so they live on a blocking thread.
    tokio::task::spawn_blocking(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.blocking_send(Event::Input(event)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::error!("failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::error!("failed to poll terminal events: {}", e);
                return;
            }
        }
    });

    loop {
        app.refresh().await;
        terminal.draw(|f| draw(f, &mut app))?;

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                handle_key(key, &mut app).await;
            }
            Some(Event::Input(_)) | Some(Event::Tick) => {}
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Renders the whole screen: header, active screen, footer, then overlays.
pub fn draw(f: &mut Frame, app: &mut App) {
    let palette = app.theme.palette();
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    header::draw_header(f, chunks[0], app);
    match app.screen {
        AppScreen::Chat => draw_chat(f, app, chunks[1]),
        AppScreen::History => history::draw_history(f, chunks[1], app),
        AppScreen::Settings => settings::draw_settings(f, chunks[1], app),
    }
    footer::draw_footer(f, chunks[2], app);

    if let Some(action) = app.confirm {
        confirm::draw_confirm(f, area, "Confirm", action.prompt(), &palette);
    } else if let Some(notice) = &app.notice {
        confirm::draw_notice(f, area, notice, &palette);
    }
}
