//! Periodic Ping frames for change-feed sockets.
//!
//! Each round also drops registrations whose socket task has exited, so
//! [`WsManager::connection_count`] stays honest for `/health`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::ws::WsManager;

/// Interval between keepalive rounds.
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Ping all sockets every [`KEEPALIVE_INTERVAL`] until `cancel` fires.
pub async fn run(ws_manager: Arc<WsManager>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(KEEPALIVE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("WebSocket keepalive stopping");
                break;
            }
            _ = interval.tick() => {
                let (pinged, pruned) = ws_manager.ping_all().await;
                if pruned > 0 {
                    tracing::debug!(pinged, pruned, "Pruned stale WebSocket connections");
                }
            }
        }
    }
}
