//! Core wire types for the relaycast routing core
//!
//! All types use camelCase JSON serialization for wire compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque identifier for one connected client session
///
/// Supplied by the transport layer per frame. Unique per live connection;
/// the sole key for task ownership and private-queue addressing.
pub type SessionId = String;

/// Inbound request payload — a free-form message string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    /// Free-form message text
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outbound reply payload — transformed message text plus creation time
///
/// Produced fresh per response; immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Transformed message text
    pub message: String,

    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Reply {
    /// Create a reply stamped with the current time
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Point-in-time view of the connected session set
///
/// Computed on demand from the session registry, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Number of currently connected sessions
    pub count: usize,

    /// Identifiers of the connected sessions, in registry order
    pub session_ids: Vec<SessionId>,

    /// Identifier of the session that requested the snapshot
    pub requester: SessionId,

    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Build a snapshot from the current session set
    pub fn new(session_ids: Vec<SessionId>, requester: impl Into<SessionId>) -> Self {
        Self {
            count: session_ids.len(),
            session_ids,
            requester: requester.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A client-originated frame handed to the router by the transport layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundFrame {
    /// Routing destination (e.g., `/hello`, `/start`)
    pub destination: String,

    /// Session identifier from the transport envelope metadata
    ///
    /// Absent when the transport failed to attach one. Operations that
    /// address a session fail with `MissingSessionId` in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    /// Request payload
    pub body: MessageBody,
}

impl InboundFrame {
    /// Create a frame without session metadata
    pub fn new(destination: impl Into<String>, body: MessageBody) -> Self {
        Self {
            destination: destination.into(),
            session_id: None,
            body,
        }
    }

    /// Attach a session identifier
    pub fn with_session(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Marker for the envelope kind carried in outbound headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameKind {
    /// Ordinary application message
    #[default]
    Message,
}

/// Headers stamped onto an outbound frame
///
/// Unicast frames carry the target session identifier so the transport
/// layer can route them to exactly that session's connection. The `extra`
/// map stays open for the transport layer to keep populating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameHeaders {
    /// Envelope kind
    #[serde(default)]
    pub kind: FrameKind,

    /// Target session for session-scoped delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    /// Transport-populated headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

impl FrameHeaders {
    /// Create headers tagged with a target session (the unicast stamp)
    pub fn for_session(session_id: impl Into<SessionId>) -> Self {
        Self {
            kind: FrameKind::Message,
            session_id: Some(session_id.into()),
            extra: HashMap::new(),
        }
    }
}

/// A frame on its way out through a broadcast topic or private queue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundFrame {
    /// Unique frame identifier (msg-<uuid>)
    pub id: String,

    /// Channel the frame is delivered on
    pub destination: String,

    /// Payload — arbitrary JSON data
    pub payload: serde_json::Value,

    /// Envelope headers
    #[serde(default, skip_serializing_if = "headers_empty")]
    pub headers: FrameHeaders,
}

fn headers_empty(headers: &FrameHeaders) -> bool {
    headers.session_id.is_none() && headers.extra.is_empty()
}

impl OutboundFrame {
    /// Create a broadcast frame with auto-generated id and empty headers
    pub fn new(destination: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: format!("msg-{}", uuid::Uuid::new_v4()),
            destination: destination.into(),
            payload,
            headers: FrameHeaders::default(),
        }
    }

    /// Create a session-scoped frame with stamped headers
    pub fn for_session(
        session_id: impl Into<SessionId>,
        destination: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: format!("msg-{}", uuid::Uuid::new_v4()),
            destination: destination.into(),
            payload,
            headers: FrameHeaders::for_session(session_id),
        }
    }
}
