//! Error types for relaycast

use thiserror::Error;

/// The kind of fault raised by the fault-injection entry point
///
/// Selected by the literal message text of an `/exception` frame.
/// Exists purely to exercise the fault-propagation path in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Selected by message `"runtime"`
    Runtime,
    /// Selected by message `"nullPointer"`
    NullReference,
    /// Selected by message `"io"`
    Io,
    /// Selected by message `"exception"`
    Generic,
    /// Selected by any other message
    InvalidParameter,
}

impl FaultKind {
    /// Map a request message to its fault kind
    pub fn from_message(message: &str) -> Self {
        match message {
            "runtime" => FaultKind::Runtime,
            "nullPointer" => FaultKind::NullReference,
            "io" => FaultKind::Io,
            "exception" => FaultKind::Generic,
            _ => FaultKind::InvalidParameter,
        }
    }
}

/// Errors that can occur while routing and dispatching frames
#[derive(Debug, Error)]
pub enum RelayError {
    /// Frame metadata carried no session identifier
    #[error("Frame metadata carries no session id")]
    MissingSessionId,

    /// Stop requested for a session with no registered recurring task
    #[error("No active task for session '{session_id}'")]
    NoActiveTask { session_id: String },

    /// No dispatch rule matches the frame's destination
    #[error("Unknown destination: {0}")]
    UnknownDestination(String),

    /// Deliberate fault from the `/exception` test hook
    #[error("Deliberate fault: {0:?}")]
    Fault(FaultKind),

    /// Payload serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, RelayError>;
