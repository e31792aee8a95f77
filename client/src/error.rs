use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectionError {
    /// A command was issued while no transport is open.
    #[error("no open transport")]
    TransportUnavailable,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to open transport to {endpoint}: {reason}")]
    Open { endpoint: String, reason: String },

    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}
