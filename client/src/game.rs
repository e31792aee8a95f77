use common::Snapshot;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::{
    Connection, ConnectionError, Connector, InputKey, PLAYER_COLORS, Renderer, SessionLink, Snake,
    Surface,
};

/// Ties the connection to the renderer: snapshots in, commands out.
///
/// Snakes are bound to player slots by position in the snapshot's player
/// list. If the server reorders players, their colours swap.
pub struct Game<S: Surface, C: Connector> {
    renderer: Renderer<S>,
    snakes: Vec<Snake>,
    connection: Connection<C>,
    session: SessionLink,
    inbox: UnboundedReceiver<Snapshot>,
    ticks: u64,
}

impl<S: Surface, C: Connector> Game<S, C> {
    pub fn new(renderer: Renderer<S>, mut connection: Connection<C>, session: SessionLink) -> Self {
        let inbox = connection.on_message();
        Self {
            renderer,
            snakes: PLAYER_COLORS.iter().copied().map(Snake::new).collect(),
            connection,
            session,
            inbox,
            ticks: 0,
        }
    }

    /// Join a game, opening the transport first if there is none.
    pub fn connect(&mut self) -> Result<(), ConnectionError> {
        if !self.connection.is_connected() {
            self.connection.init_transport()?;
        }
        let session_id = self.session.session_id().cloned();
        info!(
            "Joining game {}",
            session_id.as_ref().map(|id| id.as_str()).unwrap_or("(new)")
        );
        self.connection.connect(session_id.as_ref())
    }

    /// Leave the game. The transport stays open.
    pub fn stop(&mut self) -> Result<(), ConnectionError> {
        self.connection.stop()
    }

    pub fn init_transport(&mut self) -> Result<u64, ConnectionError> {
        self.connection.init_transport()
    }

    /// Translate a key press into a steering command. Returns whether a
    /// command was sent; keys without a direction send nothing.
    pub fn handle_key(&mut self, key: InputKey) -> Result<bool, ConnectionError> {
        let Some(direction) = key.direction() else {
            return Ok(false);
        };
        self.connection.direction(direction)?;
        Ok(true)
    }

    /// Feed one inbound text frame through the connection and render every
    /// snapshot it produced. Returns the number of ticks.
    pub fn receive_frame(&mut self, frame: &str) -> Result<usize, ConnectionError> {
        self.connection.receive_frame(frame)?;
        Ok(self.pump())
    }

    /// Handle every queued snapshot in arrival order. Returns the number of
    /// ticks.
    pub fn pump(&mut self) -> usize {
        let mut ticks = 0;
        while let Ok(snapshot) = self.inbox.try_recv() {
            if self.handle_message(&snapshot) {
                ticks += 1;
            }
        }
        ticks
    }

    /// Returns whether the snapshot triggered a tick.
    pub fn handle_message(&mut self, snapshot: &Snapshot) -> bool {
        if let Some(id) = snapshot.session_id() {
            if self.session.session_id() != Some(id) {
                info!("Game session is {}", id);
            }
            self.session.set(id.clone());
        }

        if snapshot.players.is_some() {
            self.tick(snapshot);
            return true;
        }
        false
    }

    /// Clear and redraw every player slot from `snapshot`.
    pub fn tick(&mut self, snapshot: &Snapshot) {
        self.renderer.clear();
        for (slot, snake) in self.snakes.iter_mut().enumerate() {
            snake.update(snapshot.body(slot));
            snake.draw(&mut self.renderer);
        }
        self.ticks += 1;
        debug!("Tick {} rendered", self.ticks);
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn connection(&self) -> &Connection<C> {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut Connection<C> {
        &mut self.connection
    }

    pub fn session(&self) -> &SessionLink {
        &self.session
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
