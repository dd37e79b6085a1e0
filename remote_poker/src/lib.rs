//! # Remote Poker
//!
//! Client side of a remote Texas Hold'em server. The server owns the game:
//! dealing, rules, turn order and pot distribution. This crate only talks
//! to it.
//!
//! ## Core Modules
//!
//! - [`entities`]: Table, player and action snapshots mirrored from the
//!   server's JSON
//! - [`net`]: REST client, WebSocket session and push messages
//! - [`bot`]: A simple automated player built on the REST client
//!
//! ## Example
//!
//! ```no_run
//! use remote_poker::{ApiClient, entities::ActionKind};
//!
//! # async fn example() -> remote_poker::net::errors::Result<()> {
//! let mut client = ApiClient::new("http://localhost:8000");
//! let table = client.create_table(6, 5).await?;
//! client.join_table(&table.table_id, "alice", false).await?;
//!
//! let state = client.perform_action(ActionKind::Call, 0).await?;
//! println!("pot is now {}", state.pot);
//! # Ok(())
//! # }
//! ```

/// Automated player strategy and polling loop.
pub mod bot;

/// Snapshots of server state.
pub mod entities;

/// Networking components for client-server communication.
pub mod net;
pub use net::{
    api_client::{self, ApiClient},
    errors::{self, ClientError},
    messages::{self, ServerEvent},
    session::{self, Session},
};
