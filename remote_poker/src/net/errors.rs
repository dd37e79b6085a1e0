//! Errors surfaced by the HTTP client and the WebSocket session.

use thiserror::Error;

/// Errors that can occur while talking to the poker server
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the response body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket connect, read or write failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Response body was not the JSON we expected
    #[error("Failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server answered with a non-2xx status
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// Operation needs a table/player identity from a successful join
    #[error("Not seated at a table; join one first")]
    NotJoined,

    /// Server URL can't be turned into a WebSocket URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status for server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server refused the request as invalid (wrong turn,
    /// illegal action, full table). Such errors are expected during play.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Server { status: 400, .. })
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
