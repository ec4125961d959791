//! Session-keyed ownership of recurring tasks
//!
//! Maps each session identifier to at most one active `TaskHandle`.
//! The registry is the exclusive owner of installed handles: installing
//! over an existing entry cancels the old handle first, and cancelling
//! checks presence instead of unwrapping a missing entry.

use crate::error::{RelayError, Result};
use crate::scheduler::TaskHandle;
use crate::types::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// At-most-one active recurring task per session
///
/// Cheap to clone; clones share the same task table. Each install/cancel
/// holds the write lock across the whole check-and-act, so a session's
/// start/stop pair can never interleave into a dangling handle or a
/// double cancel.
#[derive(Clone, Default)]
pub struct SessionTaskRegistry {
    tasks: Arc<RwLock<HashMap<SessionId, TaskHandle>>>,
}

impl SessionTaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handle for a session, replacing (not leaking) any prior one
    ///
    /// A session that starts twice must end up with exactly one ticker,
    /// so an existing handle is cancelled before the new one goes in.
    pub async fn install(&self, session_id: impl Into<SessionId>, handle: TaskHandle) {
        let session_id = session_id.into();
        let mut tasks = self.tasks.write().await;
        if let Some(previous) = tasks.insert(session_id.clone(), handle) {
            previous.cancel();
            tracing::warn!(session = %session_id, "Replaced active task; previous ticker cancelled");
        } else {
            tracing::info!(session = %session_id, "Recurring task installed");
        }
    }

    /// Cancel and remove the session's active task
    ///
    /// Fails with `NoActiveTask` when nothing is registered for the
    /// session; never dereferences a missing handle.
    pub async fn cancel(&self, session_id: &str) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        match tasks.remove(session_id) {
            Some(handle) => {
                handle.cancel();
                tracing::info!(session = %session_id, "Recurring task cancelled");
                Ok(())
            }
            None => Err(RelayError::NoActiveTask {
                session_id: session_id.to_string(),
            }),
        }
    }

    /// Cancel the session's task if one exists (disconnect cleanup)
    ///
    /// Unlike `cancel`, a missing entry is not an error: disconnecting a
    /// session that never started a task is normal.
    pub async fn discard(&self, session_id: &str) {
        let mut tasks = self.tasks.write().await;
        if let Some(handle) = tasks.remove(session_id) {
            handle.cancel();
            tracing::info!(session = %session_id, "Recurring task discarded on disconnect");
        }
    }

    /// Whether the session currently owns an active task
    pub async fn is_active(&self, session_id: &str) -> bool {
        self.tasks.read().await.contains_key(session_id)
    }

    /// Number of sessions with an active task
    pub async fn active_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}
