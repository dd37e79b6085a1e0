//! Networking layer for talking to the poker server.
//!
//! REST calls go through [`api_client::ApiClient`]; live updates arrive
//! over a WebSocket [`session::Session`] as [`messages::ServerEvent`]s.

/// HTTP client for the table REST endpoints.
pub mod api_client;

/// Error types shared by the HTTP client and the WebSocket session.
pub mod errors;

/// Push messages sent by the server.
pub mod messages;

/// WebSocket subscription with keep-alive.
pub mod session;
