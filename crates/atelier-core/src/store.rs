//! In-memory session registry and design history.

use atelier_protocol::{ConnectionId, DesignId, DesignSpecification};
use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Ephemeral per-connection state.
///
/// A session tracks which designs were created during a connection's lifetime
/// but does not own them; history outlives every session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Connection identifier.
    pub id: ConnectionId,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Ids of designs created in this session, in creation order.
    pub designs: Vec<DesignId>,
}

#[derive(Default)]
struct History {
    by_id: HashMap<DesignId, DesignSpecification>,
    order: Vec<DesignId>,
}

/// Process-wide store for sessions and generated designs.
///
/// Constructed once at startup and injected into the router and REST
/// handlers. History grows without bound for the process lifetime; eviction
/// is deliberately out of scope.
#[derive(Default)]
pub struct DesignStore {
    sessions: RwLock<HashMap<ConnectionId, Session>>,
    history: RwLock<History>,
}

impl DesignStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session for a new connection.
    pub fn create_session(&self, conn_id: ConnectionId) {
        let session = Session {
            id: conn_id,
            connected_at: Utc::now(),
            designs: Vec::new(),
        };
        info!("session created (conn_id={conn_id})");
        self.sessions.write().insert(conn_id, session);
    }

    /// Drop a session when its connection closes.
    pub fn destroy_session(&self, conn_id: ConnectionId) -> bool {
        let removed = self.sessions.write().remove(&conn_id).is_some();
        if removed {
            info!("session destroyed (conn_id={conn_id})");
        }
        removed
    }

    /// Fetch a snapshot of a session.
    pub fn session(&self, conn_id: ConnectionId) -> Option<Session> {
        self.sessions.read().get(&conn_id).cloned()
    }

    /// Record a generated design in history and, best-effort, in the
    /// originating session.
    ///
    /// The session may already be gone when a generation outlives its
    /// connection; that is not an error and the design is kept regardless.
    pub fn record_design(&self, conn_id: ConnectionId, spec: &DesignSpecification) {
        {
            let mut history = self.history.write();
            history.by_id.insert(spec.id, spec.clone());
            history.order.push(spec.id);
        }

        let mut sessions = self.sessions.write();
        match sessions.get_mut(&conn_id) {
            Some(session) => session.designs.push(spec.id),
            None => debug!(
                "session gone before design recorded (conn_id={conn_id}, design_id={})",
                spec.id
            ),
        }
    }

    /// Look up a design by id.
    pub fn get_design(&self, design_id: DesignId) -> Option<DesignSpecification> {
        self.history.read().by_id.get(&design_id).cloned()
    }

    /// Return the `n` most recently recorded designs in insertion order.
    pub fn list_recent(&self, n: usize) -> Vec<DesignSpecification> {
        let history = self.history.read();
        let start = history.order.len().saturating_sub(n);
        history.order[start..]
            .iter()
            .filter_map(|id| history.by_id.get(id).cloned())
            .collect()
    }

    /// Number of designs recorded so far.
    pub fn history_len(&self) -> usize {
        self.history.read().order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::DesignStore;
    use atelier_protocol::{DesignSpecification, Layout};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn spec(title: &str) -> DesignSpecification {
        DesignSpecification {
            id: Uuid::new_v4(),
            design_type: "dashboard".to_string(),
            title: title.to_string(),
            description: String::new(),
            components: Vec::new(),
            layout: Layout::default(),
            prompt: "a dashboard".to_string(),
            timestamp: chrono::Utc::now(),
            parent_id: None,
            modification: None,
            figma_instructions: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn recorded_design_is_returned_deep_equal() {
        let store = DesignStore::new();
        let conn_id = Uuid::new_v4();
        store.create_session(conn_id);

        let design = spec("Analytics");
        store.record_design(conn_id, &design);

        assert_eq!(store.get_design(design.id), Some(design.clone()));
        assert_eq!(
            store.session(conn_id).expect("session").designs,
            vec![design.id]
        );
    }

    #[test]
    fn list_recent_returns_last_n_in_insertion_order() {
        let store = DesignStore::new();
        let conn_id = Uuid::new_v4();
        store.create_session(conn_id);

        let designs: Vec<_> = (0..25).map(|i| spec(&format!("design-{i}"))).collect();
        for design in &designs {
            store.record_design(conn_id, design);
        }

        let recent = store.list_recent(20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent, designs[5..].to_vec());
        assert_eq!(store.history_len(), 25);
    }

    #[test]
    fn lookup_of_unknown_design_is_absent() {
        let store = DesignStore::new();
        assert_eq!(store.get_design(Uuid::new_v4()), None);
    }

    #[test]
    fn record_after_disconnect_keeps_design_without_session() {
        let store = DesignStore::new();
        let conn_id = Uuid::new_v4();
        store.create_session(conn_id);
        assert_eq!(store.destroy_session(conn_id), true);

        let design = spec("Orphan");
        store.record_design(conn_id, &design);

        assert_eq!(store.session(conn_id), None);
        assert_eq!(store.get_design(design.id), Some(design));
    }

    #[test]
    fn destroy_session_is_idempotent() {
        let store = DesignStore::new();
        let conn_id = Uuid::new_v4();
        store.create_session(conn_id);
        assert_eq!(store.destroy_session(conn_id), true);
        assert_eq!(store.destroy_session(conn_id), false);
    }
}
