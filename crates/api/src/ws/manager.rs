use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use salesdesk_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Owner whose changes this connection receives.
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection for `user_id`.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String, user_id: DbId) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        if let Some(conn) = self.connections.write().await.remove(conn_id) {
            let open_secs = (chrono::Utc::now() - conn.connected_at).num_seconds();
            tracing::debug!(conn_id, user_id = conn.user_id, open_secs, "Connection removed");
        }
    }

    /// Send a message to all connections belonging to a specific user.
    ///
    /// Returns the number of connections the message was sent to. Closed
    /// channels are skipped; their receive loop removes them.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values().filter(|c| c.user_id == user_id) {
            if conn.sender.send(message.clone()).is_ok() {
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Ping every connection and drop those whose socket task has gone.
    ///
    /// Returns `(pinged, pruned)`.
    pub async fn ping_all(&self) -> (usize, usize) {
        let mut conns = self.connections.write().await;
        let before = conns.len();
        conns.retain(|_, conn| conn.sender.send(Message::Ping(Bytes::new())).is_ok());
        (conns.len(), before - conns.len())
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Message {
        Message::Text(s.to_string().into())
    }

    #[tokio::test]
    async fn send_to_user_only_reaches_that_user() {
        let manager = WsManager::new();
        let mut alice_a = manager.add("a1".into(), 1).await;
        let mut alice_b = manager.add("a2".into(), 1).await;
        let mut bob = manager.add("b1".into(), 2).await;

        let sent = manager.send_to_user(1, text("hi")).await;
        assert_eq!(sent, 2);

        assert!(matches!(alice_a.try_recv(), Ok(Message::Text(_))));
        assert!(matches!(alice_b.try_recv(), Ok(Message::Text(_))));
        assert!(bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn remove_drops_connection() {
        let manager = WsManager::new();
        let _rx = manager.add("c1".into(), 5).await;
        assert_eq!(manager.connection_count().await, 1);

        manager.remove("c1").await;
        assert_eq!(manager.connection_count().await, 0);
        assert_eq!(manager.send_to_user(5, text("x")).await, 0);
    }

    #[tokio::test]
    async fn closed_receiver_is_not_counted() {
        let manager = WsManager::new();
        let rx = manager.add("c1".into(), 9).await;
        drop(rx);
        assert_eq!(manager.send_to_user(9, text("x")).await, 0);
    }

    #[tokio::test]
    async fn shutdown_all_sends_close_and_clears() {
        let manager = WsManager::new();
        let mut rx = manager.add("c1".into(), 1).await;

        manager.shutdown_all().await;

        assert!(matches!(rx.try_recv(), Ok(Message::Close(None))));
        assert_eq!(manager.connection_count().await, 0);
    }

    #[tokio::test]
    async fn ping_all_reaches_every_connection() {
        let manager = WsManager::new();
        let mut a = manager.add("a".into(), 1).await;
        let mut b = manager.add("b".into(), 2).await;

        manager.ping_all().await;

        assert!(matches!(a.try_recv(), Ok(Message::Ping(_))));
        assert!(matches!(b.try_recv(), Ok(Message::Ping(_))));
    }

    #[tokio::test]
    async fn ping_all_prunes_closed_connections() {
        let manager = WsManager::new();
        let mut live = manager.add("live".into(), 1).await;
        let gone = manager.add("gone".into(), 1).await;
        drop(gone);

        assert_eq!(manager.ping_all().await, (1, 1));
        assert_eq!(manager.connection_count().await, 1);
        assert!(matches!(live.try_recv(), Ok(Message::Ping(_))));
    }
}
