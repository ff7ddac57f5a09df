//! WebSocket infrastructure for the change feed.
//!
//! Per-user connection registry and the token-authenticated upgrade
//! handler. Keepalive pings run from [`crate::background::ws_keepalive`].

mod handler;
pub mod manager;

pub use handler::ws_handler;
pub use manager::WsManager;
