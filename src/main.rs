mod api;
mod config;
mod models;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::api::DonationApi;
use crate::config::Config;
use crate::ui::{App, get_action, render};

/// Data directory path (~/.local/share/alms/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no user data directory"))?
        .join("alms");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Log to a file; stdout belongs to the TUI
fn init_logging(data_dir: &Path) -> io::Result<()> {
    let file = fs::File::create(data_dir.join("alms.log"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let data_dir = get_data_dir().context("failed to prepare data directory")?;
    init_logging(&data_dir).context("failed to open log file")?;

    let config = Config::load(&data_dir.join("config.toml")).context("failed to load config")?;
    let api = DonationApi::new(&config).context("failed to build HTTP client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;

    let mut app = App::new(api);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app, &runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &tokio::runtime::Runtime,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = crossterm::event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(action) = get_action(&app.mode, key.code) {
                    // Awaiting here serializes network calls: a second
                    // submission cannot start while one is in flight.
                    if runtime.block_on(app.dispatch(action)) {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
