//! In-process frame delivery — broadcast topics and per-session queues
//!
//! The `Dispatcher` is the boundary between the routing core and the
//! transport layer. Broadcast channels fan out to every subscriber of a
//! named topic; unicast delivery goes to one session's private queue,
//! stamped with the target session identity so the transport can route
//! the frame to exactly that connection. All delivery is best-effort:
//! a topic with no subscribers or a detached session is a no-op.

use crate::types::{OutboundFrame, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};

/// Buffered frames per broadcast topic before lagging subscribers drop
const TOPIC_CAPACITY: usize = 64;

/// Delivers frames to broadcast topics and per-session private queues
///
/// Cheap to clone; clones share the same topic and queue tables.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// topic name → fan-out channel
    topics: Arc<RwLock<HashMap<String, broadcast::Sender<OutboundFrame>>>>,

    /// session id → private queue
    queues: Arc<RwLock<HashMap<SessionId, mpsc::UnboundedSender<OutboundFrame>>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a broadcast topic
    ///
    /// Creates the topic on first subscription. Every subscriber receives
    /// every frame broadcast to the topic after it subscribed.
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<OutboundFrame> {
        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    /// Attach a session's private queue, returning its receiving end
    ///
    /// The transport layer calls this on connect and drains the receiver
    /// into the session's connection. Re-attaching replaces the old queue.
    pub async fn attach(&self, session_id: impl Into<SessionId>) -> mpsc::UnboundedReceiver<OutboundFrame> {
        let session_id = session_id.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut queues = self.queues.write().await;
        if queues.insert(session_id.clone(), tx).is_some() {
            tracing::warn!(session = %session_id, "Replaced existing private queue");
        }
        rx
    }

    /// Detach a session's private queue (transport disconnect)
    pub async fn detach(&self, session_id: &str) {
        let mut queues = self.queues.write().await;
        queues.remove(session_id);
    }

    /// Deliver a payload to every subscriber of each named topic
    ///
    /// Fire-and-forget: no acknowledgment, and topics nobody subscribed
    /// to swallow the frame.
    pub async fn broadcast<S: AsRef<str>>(&self, channels: &[S], payload: serde_json::Value) {
        let topics = self.topics.read().await;
        for channel in channels {
            let channel = channel.as_ref();
            let frame = OutboundFrame::new(channel, payload.clone());
            match topics.get(channel) {
                Some(tx) => {
                    let delivered = tx.send(frame).unwrap_or(0);
                    tracing::debug!(topic = %channel, subscribers = delivered, "Broadcast frame");
                }
                None => {
                    tracing::debug!(topic = %channel, "Broadcast to topic with no subscribers");
                }
            }
        }
    }

    /// Deliver a payload to one session's private channel
    ///
    /// The outgoing frame is stamped with the target session identity.
    /// A session with no attached queue has disconnected between
    /// scheduling and firing; delivery silently drops the frame.
    pub async fn unicast(&self, session_id: &str, destination: &str, payload: serde_json::Value) {
        let frame = OutboundFrame::for_session(session_id, destination, payload);
        let queues = self.queues.read().await;
        match queues.get(session_id) {
            Some(tx) => {
                if tx.send(frame).is_err() {
                    tracing::debug!(session = %session_id, dest = %destination, "Private queue closed; frame dropped");
                } else {
                    tracing::debug!(session = %session_id, dest = %destination, "Unicast frame");
                }
            }
            None => {
                tracing::debug!(session = %session_id, dest = %destination, "Session not attached; frame dropped");
            }
        }
    }

    /// Number of sessions with an attached private queue
    pub async fn attached_sessions(&self) -> usize {
        self.queues.read().await.len()
    }
}
