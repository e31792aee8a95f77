use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::Position;

/// Identifier of a game session on the server.
///
/// The server assigns numeric ids, but the client only ever echoes them back,
/// so they are kept as opaque text. Both JSON strings and JSON numbers are
/// accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Returns `None` for blank ids, which the server uses to mean "no session".
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = Self::normalized(&id.into());
        if id.0.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    fn normalized(id: &str) -> Self {
        SessionId(id.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSessionId {
            Text(String),
            Number(u64),
        }

        Ok(match RawSessionId::deserialize(deserializer)? {
            RawSessionId::Text(text) => SessionId::normalized(&text),
            RawSessionId::Number(number) => SessionId(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: Vec<Position>,
}

impl PlayerState {
    pub fn new(body: Vec<Position>) -> Self {
        Self { body }
    }
}

/// One authoritative state update pushed by the server.
///
/// Both fields are optional and independent: a message may announce the
/// session, carry the players, do both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerState>>,
}

impl Snapshot {
    pub fn with_players(players: Vec<PlayerState>) -> Self {
        Self {
            game_session_id: None,
            players: Some(players),
        }
    }

    pub fn with_session(id: SessionId) -> Self {
        Self {
            game_session_id: Some(id),
            players: None,
        }
    }

    /// The announced session id, ignoring blank values.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.game_session_id
            .as_ref()
            .filter(|id| !id.as_str().trim().is_empty())
    }

    /// Body of the player in `slot`; a missing slot is an empty body.
    pub fn body(&self, slot: usize) -> &[Position] {
        self.players
            .as_ref()
            .and_then(|players| players.get(slot))
            .map(|player| player.body.as_slice())
            .unwrap_or(&[])
    }
}

/// Every text frame the server sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Reply to `/connect`: whether a player slot was granted.
    JoinAck(bool),
    Snapshot(Snapshot),
}

impl ServerMessage {
    /// Only a JSON boolean or a JSON object is a valid frame.
    pub fn parse(frame: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Value>(frame)? {
            Value::Bool(accepted) => Ok(ServerMessage::JoinAck(accepted)),
            value @ Value::Object(_) => serde_json::from_value(value).map(ServerMessage::Snapshot),
            other => Err(serde_json::Error::custom(format!(
                "expected a snapshot object or a join ack, got {}",
                kind(&other)
            ))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Position>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_players_without_session() {
        let msg = ServerMessage::parse(
            r#"{"players":[{"body":[{"x":1,"y":1}],"direction":"RIGHT"},{"body":[{"x":5,"y":5}]}]}"#,
        )
        .unwrap();

        let ServerMessage::Snapshot(snapshot) = msg else {
            panic!("expected snapshot");
        };
        assert_eq!(snapshot.session_id(), None);
        assert_eq!(snapshot.body(0), &[Position::new(1, 1)]);
        assert_eq!(snapshot.body(1), &[Position::new(5, 5)]);
        assert!(snapshot.body(2).is_empty());
    }

    #[test]
    fn numeric_session_id_is_kept_as_text() {
        let msg = ServerMessage::parse(r#"{"game_session_id":1234567890123}"#).unwrap();
        let ServerMessage::Snapshot(snapshot) = msg else {
            panic!("expected snapshot");
        };
        assert_eq!(snapshot.session_id().map(SessionId::as_str), Some("1234567890123"));
        assert!(snapshot.players.is_none());
    }

    #[test]
    fn blank_session_id_is_ignored() {
        let msg = ServerMessage::parse(r#"{"game_session_id":""}"#).unwrap();
        let ServerMessage::Snapshot(snapshot) = msg else {
            panic!("expected snapshot");
        };
        assert_eq!(snapshot.session_id(), None);
        assert_eq!(SessionId::new("   "), None);
    }

    #[test]
    fn null_body_is_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"players":[{"body":null},{}]}"#).unwrap();
        assert!(snapshot.body(0).is_empty());
        assert!(snapshot.body(1).is_empty());
    }

    #[test]
    fn boolean_frame_is_join_ack() {
        assert_eq!(ServerMessage::parse("true").unwrap(), ServerMessage::JoinAck(true));
        assert_eq!(ServerMessage::parse("false").unwrap(), ServerMessage::JoinAck(false));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(ServerMessage::parse("not json").is_err());
        assert!(ServerMessage::parse(r#""a string""#).is_err());
        assert!(ServerMessage::parse(r#"{"players":[{"body":[{"x":"a","y":1}]}]}"#).is_err());
    }

    #[test]
    fn non_object_frames_are_rejected() {
        assert!(ServerMessage::parse("[null, []]").is_err());
        assert!(ServerMessage::parse("[]").is_err());
        assert!(ServerMessage::parse("null").is_err());
        assert!(ServerMessage::parse("42").is_err());
        assert!(ServerMessage::parse(r#"{"players":[[[1,1]]]}"#).is_err());
    }

    #[test]
    fn announced_session_id_is_trimmed() {
        let msg = ServerMessage::parse(r#"{"game_session_id":" 42 "}"#).unwrap();
        let ServerMessage::Snapshot(snapshot) = msg else {
            panic!("expected snapshot");
        };
        assert_eq!(snapshot.session_id().map(SessionId::as_str), Some("42"));
    }
}
