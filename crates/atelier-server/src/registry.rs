//! Registry of live connections for direct replies and fan-out.

use atelier_protocol::{ConnectionId, ServerEvent};
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::mpsc;

struct ConnectionHandle {
    tx: mpsc::Sender<String>,
    plugin: bool,
}

/// Map of connection id to outbound sender plus plugin-listener flag.
///
/// Senders are cloned out of the lock before any await, so the lock is never
/// held across a suspension point.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the outbound channel for a new connection.
    pub fn add(&self, conn_id: ConnectionId, tx: mpsc::Sender<String>) {
        self.connections
            .write()
            .insert(conn_id, ConnectionHandle { tx, plugin: false });
    }

    /// Drop a closed connection.
    pub fn remove(&self, conn_id: ConnectionId) {
        self.connections.write().remove(&conn_id);
    }

    /// Mark a connection as a design-tool plugin listener.
    pub fn mark_plugin(&self, conn_id: ConnectionId) -> bool {
        match self.connections.write().get_mut(&conn_id) {
            Some(handle) => {
                handle.plugin = true;
                true
            }
            None => false,
        }
    }

    /// Number of connections currently marked as plugin listeners.
    pub fn plugin_count(&self) -> usize {
        self.connections
            .read()
            .values()
            .filter(|handle| handle.plugin)
            .count()
    }

    /// Send an event to one connection; dropped silently if it is gone.
    pub async fn send_to(&self, conn_id: ConnectionId, event: &ServerEvent) {
        let Some(encoded) = encode(event) else {
            return;
        };
        let tx = self
            .connections
            .read()
            .get(&conn_id)
            .map(|handle| handle.tx.clone());
        match tx {
            Some(tx) => {
                if tx.send(encoded).await.is_err() {
                    debug!("outbound channel closed (conn_id={conn_id})");
                }
            }
            None => debug!("dropping event for closed connection (conn_id={conn_id})"),
        }
    }

    /// Fan an event out to every connection except the sender.
    pub async fn broadcast_others(&self, sender_id: ConnectionId, event: &ServerEvent) {
        let Some(encoded) = encode(event) else {
            return;
        };
        let targets: Vec<mpsc::Sender<String>> = self
            .connections
            .read()
            .iter()
            .filter(|(conn_id, _)| **conn_id != sender_id)
            .map(|(_, handle)| handle.tx.clone())
            .collect();
        for tx in targets {
            let _ = tx.send(encoded.clone()).await;
        }
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(encoded) => Some(encoded),
        Err(err) => {
            warn!("failed to encode outbound event: {err}");
            None
        }
    }
}
