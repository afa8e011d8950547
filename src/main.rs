use std::fs::File;
use std::io;
use std::io::Stdout;
use std::path::Path;
use std::sync::Mutex;
use std::time;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use life::config::Config;
use life::events::Flow;
use life::game::Game;
use life::view::TermView;
use life::view::View;

const FRAMERATE: u32 = 60;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

/// Puts the terminal in raw mode on the alternate screen, and takes it back out when dropped
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // From here on, dropping the guard restores the terminal
        let guard = Self;

        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .context("Failed to set up the terminal")?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Logs go to a file, if at all. The terminal belongs to the UI.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn run(config: &Config) -> anyhow::Result<()> {
    let view = TermView::new(io::stdout());
    let mut game: Game<_, TermView<Stdout>> = Game::new(config.field(), view, config.speed)
        .context("Failed to draw the initial state")?;

    loop {
        // Wake up in time for the next generation
        let timeout = match game.deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(Instant::now())
                .min(FRAMETIME),
            None => FRAMETIME,
        };

        let event = game
            .view_mut()
            .poll_event(timeout)
            .context("Failed to read terminal input")?;

        if let Some(event) = event {
            if game.handle(event, Instant::now())? == Flow::Exit {
                break;
            }
        }

        game.tick(Instant::now())?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    init_logging(config.log_file.as_deref())?;
    info!(?config, "Starting");

    let guard = TerminalGuard::enter()?;
    let res = run(&config);
    drop(guard);

    res
}
