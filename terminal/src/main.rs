use anyhow::{Context, Result};
use clap::Parser;
use client::{Connection, FrameBuffer, Game, Renderer};
use common::VIEWPORT;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

use terminal::app::{key_command, App, AppCommand};
use terminal::config::{Args, Config};
use terminal::transport::{TransportEvent, WsConnector};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(args)?;
    init_tracing(&config.log_file)?;

    info!(
        "Starting snake client for {} (endpoint {})",
        config.page_url, config.endpoint
    );
    println!("Logging to {:?}", config.log_file);

    // Composition root
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let connection = Connection::new(WsConnector::new(events_tx), config.endpoint.clone());
    let renderer = Renderer::new(FrameBuffer::new(VIEWPORT));
    let game = Game::new(renderer, connection, config.session_link());
    let mut app = App::new(game);

    if config.auto_init {
        app.handle_command(AppCommand::InitTransport);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, events_rx).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {:?}", log_file))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Single-threaded event loop: each input or transport event is handled to
/// completion, then the screen is redrawn.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<WsConnector>,
    mut transport_events: UnboundedReceiver<TransportEvent>,
) -> Result<()> {
    let mut input = EventStream::new();

    loop {
        terminal.draw(|f| app.render(f))?;

        tokio::select! {
            event = input.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match key_command(key) {
                            AppCommand::Quit => return Ok(()),
                            command => app.handle_command(command),
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("Failed to read terminal input"),
                    None => return Ok(()),
                }
            }
            Some(event) = transport_events.recv() => {
                app.handle_transport_event(event);
            }
        }
    }
}
