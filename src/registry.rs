//! Connected-session bookkeeping
//!
//! The routing core only ever reads the session set; registration and
//! removal are driven by the transport layer's connect/disconnect events.

use crate::types::SessionId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-only view of the currently connected sessions
///
/// Implementations track connection lifecycle events from the transport
/// layer. Snapshots are best-effort: a concurrent connect/disconnect may
/// or may not be reflected.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Identifiers of all currently connected sessions
    async fn sessions(&self) -> Vec<SessionId>;

    /// Whether a session is currently connected
    async fn is_connected(&self, session_id: &str) -> bool {
        self.sessions().await.iter().any(|s| s == session_id)
    }
}

/// In-process session registry
///
/// Tracks connected session identifiers in a `HashSet`. Cheap to clone;
/// clones share the same underlying set.
#[derive(Clone, Default)]
pub struct MemorySessionRegistry {
    sessions: Arc<RwLock<HashSet<SessionId>>>,
}

impl MemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly connected session
    pub async fn connect(&self, session_id: impl Into<SessionId>) {
        let session_id = session_id.into();
        let mut sessions = self.sessions.write().await;
        if !sessions.insert(session_id.clone()) {
            tracing::warn!(session = %session_id, "Session id reused while still connected");
        }
        tracing::debug!(session = %session_id, total = sessions.len(), "Session connected");
    }

    /// Record a disconnected session
    pub async fn disconnect(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        tracing::debug!(session = %session_id, total = sessions.len(), "Session disconnected");
    }

    /// Number of connected sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are connected
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRegistry for MemorySessionRegistry {
    async fn sessions(&self) -> Vec<SessionId> {
        self.sessions.read().await.iter().cloned().collect()
    }

    async fn is_connected(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains(session_id)
    }
}
