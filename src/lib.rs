//! # relaycast
//!
//! Session-scoped message routing with broadcast/unicast dispatch and
//! per-session recurring publications.
//!
//! ## Overview
//!
//! `relaycast` is the in-process core of a message-routing endpoint:
//! clients on persistent bidirectional sessions send frames to symbolic
//! destinations, and the router replies by broadcasting to named topics,
//! unicasting to the requesting session's private queue, or starting a
//! recurring publication that streams values to that session until
//! cancelled. Transport framing, authentication, and persistence live
//! outside this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use relaycast::{
//!     Dispatcher, InboundFrame, MemorySessionRegistry, MessageBody, RelayConfig, Router,
//!     SessionTaskRegistry, TaskScheduler,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> relaycast::Result<()> {
//! let dispatcher = Dispatcher::new();
//! let router = Router::new(
//!     dispatcher.clone(),
//!     Arc::new(MemorySessionRegistry::new()),
//!     SessionTaskRegistry::new(),
//!     TaskScheduler::new(),
//!     RelayConfig::default(),
//! );
//!
//! // A subscriber on a broadcast topic sees every /hello reply
//! let mut replies = dispatcher.subscribe("/topic/hello").await;
//! router
//!     .handle(InboundFrame::new("/hello", MessageBody::new("hi")))
//!     .await?;
//!
//! let frame = replies.recv().await.expect("reply broadcast");
//! assert_eq!(frame.payload["message"], "HI");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Router** — destination dispatch table; the message-handling core
//! - **Dispatcher** — broadcast topics and per-session private queues,
//!   with session-identity stamping on unicast frames
//! - **TaskScheduler** / **TaskHandle** — cancellable recurring work on a
//!   time-driven schedule
//! - **SessionTaskRegistry** — at most one active recurring task per
//!   session, cancel-before-replace
//! - **SessionRegistry** trait — read-only view of connected sessions,
//!   fed by the transport layer

pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod router;
pub mod scheduler;
pub mod tasks;
pub mod types;

// Re-export core types
pub use config::RelayConfig;
pub use dispatch::Dispatcher;
pub use error::{FaultKind, RelayError, Result};
pub use registry::{MemorySessionRegistry, SessionRegistry};
pub use router::Router;
pub use scheduler::{TaskHandle, TaskScheduler, TickFn};
pub use tasks::SessionTaskRegistry;
pub use types::{
    FrameHeaders, FrameKind, InboundFrame, MessageBody, OutboundFrame, Reply, SessionId,
    SessionSnapshot,
};
