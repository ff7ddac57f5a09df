use std::sync::Arc;

use salesdesk_events::{ChangeEvent, EventBus};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: salesdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Row change notifications, fanned out to the change feed.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Publish a row change notification.
    pub fn notify(&self, event: ChangeEvent) {
        self.event_bus.publish(event);
    }
}
