use common::{ClientCommand, Direction, ServerMessage, SessionId, Snapshot};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use url::Url;

use crate::ConnectionError;

/// An open duplex channel to the game server.
pub trait Transport {
    fn send_text(&mut self, frame: &str) -> Result<(), ConnectionError>;

    fn close(&mut self);
}

/// Opens transports. `generation` identifies the transport in any
/// notifications the host later feeds back (see [`Connection::transport_closed`]).
pub trait Connector {
    type Transport: Transport;

    fn open(&mut self, endpoint: &Url, generation: u64) -> Result<Self::Transport, ConnectionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}

enum ConnectionState<T> {
    Disconnected,
    Connected { transport: T, generation: u64 },
}

pub struct Connection<C: Connector> {
    connector: C,
    endpoint: Url,
    state: ConnectionState<C::Transport>,
    next_generation: u64,
    subscriber: Option<UnboundedSender<Snapshot>>,
}

impl<C: Connector> Connection<C> {
    /// Creates a disconnected connection; nothing is opened until
    /// [`Connection::init_transport`] is called.
    pub fn new(connector: C, endpoint: Url) -> Self {
        Self {
            connector,
            endpoint,
            state: ConnectionState::Disconnected,
            next_generation: 1,
            subscriber: None,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn status(&self) -> ConnectionStatus {
        match self.state {
            ConnectionState::Disconnected => ConnectionStatus::Disconnected,
            ConnectionState::Connected { .. } => ConnectionStatus::Connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status() == ConnectionStatus::Connected
    }

    /// Generation of the open transport.
    pub fn generation(&self) -> Option<u64> {
        match self.state {
            ConnectionState::Disconnected => None,
            ConnectionState::Connected { generation, .. } => Some(generation),
        }
    }

    /// (Re)open the transport, closing the current one first.
    pub fn init_transport(&mut self) -> Result<u64, ConnectionError> {
        self.close();

        let generation = self.next_generation;
        self.next_generation += 1;

        match self.connector.open(&self.endpoint, generation) {
            Ok(transport) => {
                info!("Opened transport {} to {}", generation, self.endpoint);
                self.state = ConnectionState::Connected {
                    transport,
                    generation,
                };
                Ok(generation)
            }
            Err(err) => {
                warn!("Failed to open transport to {}: {}", self.endpoint, err);
                Err(err)
            }
        }
    }

    /// Close the current transport, if any.
    pub fn close(&mut self) {
        let previous = std::mem::replace(&mut self.state, ConnectionState::Disconnected);
        if let ConnectionState::Connected {
            mut transport,
            generation,
        } = previous
        {
            debug!("Closing transport {}", generation);
            transport.close();
        }
    }

    /// The transport with `generation` has gone away. Notifications about
    /// transports that were already replaced are ignored.
    pub fn transport_closed(&mut self, generation: u64) -> bool {
        if self.generation() != Some(generation) {
            debug!("Ignoring close of stale transport {}", generation);
            return false;
        }
        info!("Transport {} closed", generation);
        self.state = ConnectionState::Disconnected;
        true
    }

    /// Register the single subscriber for inbound snapshots. A previous
    /// subscriber stops receiving; its channel is closed.
    pub fn on_message(&mut self) -> UnboundedReceiver<Snapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.subscriber.replace(tx).is_some() {
            debug!("Replaced message subscriber");
        }
        rx
    }

    /// Parse one inbound text frame and hand snapshots to the subscriber.
    pub fn receive_frame(&mut self, frame: &str) -> Result<(), ConnectionError> {
        match ServerMessage::parse(frame) {
            Ok(ServerMessage::Snapshot(snapshot)) => {
                self.dispatch(snapshot);
                Ok(())
            }
            Ok(ServerMessage::JoinAck(true)) => {
                info!("Server accepted join");
                Ok(())
            }
            Ok(ServerMessage::JoinAck(false)) => {
                warn!("Server rejected join: session is full");
                Ok(())
            }
            Err(err) => {
                warn!("Dropping malformed frame: {}", err);
                Err(err.into())
            }
        }
    }

    fn dispatch(&mut self, snapshot: Snapshot) {
        let Some(subscriber) = &self.subscriber else {
            debug!("No subscriber, dropping snapshot");
            return;
        };
        if subscriber.send(snapshot).is_err() {
            debug!("Subscriber went away, dropping snapshot");
            self.subscriber = None;
        }
    }

    /// Send a raw payload verbatim.
    pub fn send(&mut self, payload: &str) -> Result<(), ConnectionError> {
        match &mut self.state {
            ConnectionState::Disconnected => Err(ConnectionError::TransportUnavailable),
            ConnectionState::Connected {
                transport,
                generation,
            } => {
                debug!("Sending on transport {}: {}", generation, payload);
                transport.send_text(payload)
            }
        }
    }

    pub fn send_command(&mut self, command: &ClientCommand) -> Result<(), ConnectionError> {
        self.send(&command.to_string())
    }

    pub fn connect(&mut self, session_id: Option<&SessionId>) -> Result<(), ConnectionError> {
        self.send_command(&ClientCommand::Connect(session_id.cloned()))
    }

    pub fn stop(&mut self) -> Result<(), ConnectionError> {
        self.send_command(&ClientCommand::Stop)
    }

    pub fn direction(&mut self, direction: Direction) -> Result<(), ConnectionError> {
        self.send_command(&ClientCommand::Direction(direction))
    }
}

impl<C: Connector> Drop for Connection<C> {
    fn drop(&mut self) {
        self.close();
    }
}
