//! Terminal front-end for the battle simulator server.
//!
//! One screen for session setup, one for the battle itself. All
//! requests run on spawned tasks; the draw loop selects over terminal
//! events and completed-request messages.

mod app;
mod ui;

use std::io::{Stdout, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use maison_client::{BattleClient, Session};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::{App, Msg};

#[derive(Parser)]
#[command(name = "maison-tui", about = "Terminal client for the battle simulator")]
struct Args {
    /// Base URL of the simulator server.
    #[arg(long, default_value = "http://localhost:5000")]
    server: String,

    /// Write logs to this file. Stderr is unusable while the
    /// alternate screen is active, so without this nothing is logged.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let result = run(&mut terminal, &args.server).await;

    // Teardown runs even when the loop errored, or the shell is left
    // in raw mode.
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, server: &str) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Msg>();
    let session = Session::new(BattleClient::new(server));
    let mut app = App::new(session, tx);
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.on_key(key.code);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("terminal event stream failed"),
                    None => return Ok(()),
                }
            }
            maybe_msg = rx.recv() => {
                if let Some(msg) = maybe_msg {
                    app.on_msg(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
