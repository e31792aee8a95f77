use client::{ConnectionError, Connector, FrameBuffer, Game, InputKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::transport::TransportEvent;
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Quit,
    Connect,
    Stop,
    InitTransport,
    Key(InputKey),
}

/// Map a terminal key press. Keys the UI does not use are forwarded to the
/// game as-is so it can decide to ignore them.
pub fn key_command(key: KeyEvent) -> AppCommand {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppCommand::Quit,
        KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
        KeyCode::Char('c') => AppCommand::Connect,
        KeyCode::Char('s') => AppCommand::Stop,
        KeyCode::Char('i') => AppCommand::InitTransport,
        KeyCode::Up => AppCommand::Key(InputKey::ArrowUp),
        KeyCode::Down => AppCommand::Key(InputKey::ArrowDown),
        KeyCode::Left => AppCommand::Key(InputKey::ArrowLeft),
        KeyCode::Right => AppCommand::Key(InputKey::ArrowRight),
        KeyCode::Char(ch) => AppCommand::Key(InputKey::Char(ch)),
        _ => AppCommand::Key(InputKey::Other),
    }
}

pub struct App<C: Connector> {
    pub game: Game<FrameBuffer, C>,
    /// Generation of the transport whose handshake completed
    pub open_generation: Option<u64>,
    pub last_error: Option<String>,
}

impl<C: Connector> App<C> {
    pub fn new(game: Game<FrameBuffer, C>) -> Self {
        Self {
            game,
            open_generation: None,
            last_error: None,
        }
    }

    /// Runs one user command. Failures are logged and shown in the status
    /// bar; none of them stop the UI. `Quit` is handled by the main loop.
    pub fn handle_command(&mut self, command: AppCommand) {
        let result = match command {
            AppCommand::Quit => Ok(()),
            AppCommand::Connect => self.game.connect(),
            AppCommand::Stop => self.game.stop(),
            AppCommand::InitTransport => {
                self.open_generation = None;
                self.game.init_transport().map(|_| ())
            }
            AppCommand::Key(key) => self.game.handle_key(key).map(|_| ()),
        };

        match result {
            Ok(()) => self.last_error = None,
            Err(err) => self.record_error(command, err),
        }
    }

    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        let current = self.game.connection().generation();
        match event {
            TransportEvent::Opened { generation } if current == Some(generation) => {
                self.open_generation = Some(generation);
            }
            TransportEvent::Frame { generation, text } if current == Some(generation) => {
                if let Err(err) = self.game.receive_frame(&text) {
                    warn!("Ignoring frame: {}", err);
                }
            }
            TransportEvent::Closed { generation, reason } => {
                if self.game.connection_mut().transport_closed(generation) {
                    self.open_generation = None;
                    if let Some(reason) = reason {
                        self.last_error = Some(reason);
                    }
                }
            }
            stale => debug!("Dropping event from replaced transport: {:?}", stale),
        }
    }

    pub fn shutdown(&mut self) {
        self.game.connection_mut().close();
    }

    pub fn render(&self, frame: &mut Frame) {
        view::render(frame, self);
    }

    fn record_error(&mut self, command: AppCommand, err: ConnectionError) {
        warn!("{:?} failed: {}", command, err);
        let hint = match &err {
            ConnectionError::TransportUnavailable => " (press i to open the connection)",
            _ => "",
        };
        self.last_error = Some(format!("{err}{hint}"));
    }
}
