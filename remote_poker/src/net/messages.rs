//! Messages pushed by the server over the table WebSocket.

use serde::Deserialize;

use crate::entities::{ActionKind, Chips, TableState, short_id};

/// Keep-alive frame sent by the client.
pub const PING: &str = "ping";

/// Server's reply to [`PING`]. Not JSON, so it never reaches the event
/// callback.
pub const PONG: &str = "pong";

/// A decoded push message. The snapshots embedded here are the public view
/// of the table: every player's cards are hidden.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Sent once right after the socket is accepted
    Connected { player_id: String, table_id: String },
    /// Someone took a seat
    PlayerJoined {
        player_id: String,
        player_name: String,
        table_state: TableState,
    },
    /// Someone acted
    ActionPerformed {
        player_id: String,
        player_name: String,
        action: ActionKind,
        #[serde(default)]
        amount: Option<Chips>,
        table_state: TableState,
    },
    /// A socket at this table went away
    PlayerDisconnected { player_id: String },
    /// Any message type this client doesn't understand
    #[serde(other)]
    Unknown,
}

impl ServerEvent {
    /// Table snapshot carried by the event, if any.
    pub fn table_state(&self) -> Option<&TableState> {
        match self {
            Self::PlayerJoined { table_state, .. } | Self::ActionPerformed { table_state, .. } => {
                Some(table_state)
            }
            _ => None,
        }
    }

    /// One-line description for a notice in the terminal.
    pub fn summary(&self) -> String {
        match self {
            Self::Connected { table_id, .. } => {
                format!("Subscribed to table {}", short_id(table_id))
            }
            Self::PlayerJoined { player_name, .. } => format!("{player_name} joined the table"),
            Self::ActionPerformed {
                player_name,
                action,
                amount,
                ..
            } => match amount {
                Some(amount) if *amount > 0 => format!("{player_name} {action} ¥{amount}"),
                _ => format!("{player_name} {action}"),
            },
            Self::PlayerDisconnected { player_id } => {
                format!("Player {} disconnected", short_id(player_id))
            }
            Self::Unknown => "Unrecognized message from server".to_string(),
        }
    }
}
