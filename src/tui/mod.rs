//! Terminal UI for Clash Chameleon

mod app;
mod screens;

pub use app::{App, AppEvent, Intent, intent_for};

use std::io;

use anyhow::Result;
use chameleon_core::BoardProvider;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::Duration;
use tracing::{error, info, instrument};

use crate::config::GameConfig;

/// Runs the pass-the-device game on this terminal.
pub async fn run_tui<P: BoardProvider>(
    config: GameConfig,
    players: &[String],
    provider: P,
) -> Result<()> {
    // Log to a file so output does not corrupt the terminal
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(category = %config.category(), mode = %config.mode(), "Starting Clash Chameleon TUI");

    let mut app = App::new(config);
    app.seat(players);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &provider).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, read a key, react; repeat until the player quits.
#[instrument(skip_all)]
async fn run_app<B, P>(terminal: &mut Terminal<B>, app: &mut App, provider: &P) -> Result<()>
where
    B: ratatui::backend::Backend,
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
    P: BoardProvider,
{
    loop {
        terminal.draw(|f| screens::draw(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Crossterm reports both press and release on some platforms
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match app.handle_key(key) {
            AppEvent::Redraw => {}
            AppEvent::Quit => {
                info!("User quit");
                return Ok(());
            }
            AppEvent::LoadBoard(request) => {
                terminal.draw(|f| screens::draw(f, app))?;
                let result = app.game_mut().load_board(provider, request).await;
                app.board_loaded(result);
            }
        }
    }
}
