//! Terminal client for a remote poker server.
//!
//! This library provides command parsing, configuration, rendering and the
//! interactive loop used by the rp_client binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod render;
