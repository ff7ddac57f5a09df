//! Fan-out of row change notifications to WebSocket clients.
//!
//! [`ChangeFeed`] subscribes to the [`EventBus`](salesdesk_events::EventBus)
//! and forwards each [`ChangeEvent`] to every connection of the row's owner.
//! Clients treat a notification as a hint to re-fetch.

use std::sync::Arc;

use axum::extract::ws::Message;
use salesdesk_events::ChangeEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes change events to the owning user's sockets.
pub struct ChangeFeed {
    ws_manager: Arc<WsManager>,
}

impl ChangeFeed {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// Exits when the channel is closed (i.e. the `EventBus` is dropped).
    /// A lagged receiver logs the number of skipped events and continues;
    /// clients recover on their next full refresh.
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change feed shutting down");
                    break;
                }
            }
        }
    }

    async fn forward(&self, event: &ChangeEvent) {
        let payload = event.to_client_json().to_string();
        let delivered = self
            .ws_manager
            .send_to_user(event.owner_id, Message::Text(payload.into()))
            .await;
        tracing::trace!(
            owner_id = event.owner_id,
            id = event.id,
            delivered,
            "Change event forwarded"
        );
    }
}
