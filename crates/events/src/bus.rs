//! In-process change-notification bus backed by a `tokio::sync::broadcast`
//! channel.
//!
//! Handlers publish a [`ChangeEvent`] after every successful insert, update
//! or delete. Subscribers (the WebSocket change feed) forward them to the
//! owning user's connections; clients re-fetch wholesale on receipt.

use chrono::{DateTime, Utc};
use salesdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// Table a change happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    Leads,
    Contacts,
    Activities,
    LeadForms,
}

/// Kind of row mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// A row-level change owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub op: ChangeOp,
    /// Primary key of the changed row.
    pub id: DbId,
    /// Owner of the changed row; only this user is notified.
    pub owner_id: DbId,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: ChangeTable, op: ChangeOp, id: DbId, owner_id: DbId) -> Self {
        Self {
            table,
            op,
            id,
            owner_id,
            timestamp: Utc::now(),
        }
    }

    pub fn inserted(table: ChangeTable, id: DbId, owner_id: DbId) -> Self {
        Self::new(table, ChangeOp::Insert, id, owner_id)
    }

    pub fn updated(table: ChangeTable, id: DbId, owner_id: DbId) -> Self {
        Self::new(table, ChangeOp::Update, id, owner_id)
    }

    pub fn deleted(table: ChangeTable, id: DbId, owner_id: DbId) -> Self {
        Self::new(table, ChangeOp::Delete, id, owner_id)
    }

    /// Wire payload sent to clients. The owner is implied by the socket.
    pub fn to_client_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "change",
            "table": self.table,
            "op": self.op,
            "id": self.id,
            "timestamp": self.timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ChangeEvent`].
///
/// # Usage
///
/// ```rust
/// use salesdesk_events::{ChangeEvent, ChangeTable, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ChangeEvent::inserted(ChangeTable::Leads, 1, 7));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ChangeEvent) {
        // A SendError only means there are zero receivers.
        if let Ok(receivers) = self.sender.send(event) {
            tracing::trace!(receivers, "Change event published");
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
