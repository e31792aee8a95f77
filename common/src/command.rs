use std::fmt;

use crate::{Direction, SessionId};

/// Outbound text commands understood by the game server.
///
/// Wire encoding:
///
/// * `/connect` or `/connect <session id>` to join a game
/// * `/stop` to leave it
/// * `/direction <up|down|left|right>` to steer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Connect(Option<SessionId>),
    Stop,
    Direction(Direction),
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCommand::Connect(None) => f.write_str("/connect"),
            ClientCommand::Connect(Some(id)) => write!(f, "/connect {id}"),
            ClientCommand::Stop => f.write_str("/stop"),
            ClientCommand::Direction(direction) => write!(f, "/direction {direction}"),
        }
    }
}
