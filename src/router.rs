//! Destination-based frame routing — the message-handling core
//!
//! For each inbound frame the router selects a handling rule by
//! destination and either broadcasts a transformed reply, unicasts to
//! the requesting session's private queue, starts or stops that
//! session's recurring publication, or raises a fault. Faults fail the
//! one request; they never touch other sessions' tasks or pending
//! frames, and nothing here terminates the process.

use crate::config::RelayConfig;
use crate::dispatch::Dispatcher;
use crate::error::{FaultKind, RelayError, Result};
use crate::registry::SessionRegistry;
use crate::scheduler::{TaskScheduler, TickFn};
use crate::tasks::SessionTaskRegistry;
use crate::types::{InboundFrame, Reply, SessionId, SessionSnapshot};
use rand::Rng;
use std::sync::Arc;

/// Routes inbound frames to their handler by destination
///
/// All collaborators are injected at startup; the router holds no state
/// of its own beyond them.
pub struct Router {
    dispatcher: Dispatcher,
    sessions: Arc<dyn SessionRegistry>,
    tasks: SessionTaskRegistry,
    scheduler: TaskScheduler,
    config: RelayConfig,
}

impl Router {
    pub fn new(
        dispatcher: Dispatcher,
        sessions: Arc<dyn SessionRegistry>,
        tasks: SessionTaskRegistry,
        scheduler: TaskScheduler,
        config: RelayConfig,
    ) -> Self {
        Self {
            dispatcher,
            sessions,
            tasks,
            scheduler,
            config,
        }
    }

    /// Handle one inbound frame
    ///
    /// Dispatch table:
    /// - `/hello` — uppercase reply, broadcast to the default channel set
    /// - `/hello/{detail}` — same reply; the variable segment is logged
    /// - `/sessions` — session snapshot, unicast to the requester
    /// - `/start` — begin the session's recurring trade publication
    /// - `/stop` — cancel it (`NoActiveTask` if none)
    /// - `/exception` — fault-injection test hook
    pub async fn handle(&self, frame: InboundFrame) -> Result<()> {
        tracing::info!(
            dest = %frame.destination,
            session = ?frame.session_id,
            message = %frame.body.message,
            "Inbound frame"
        );

        match frame.destination.as_str() {
            "/hello" => self.basic(&frame).await,
            "/sessions" => self.snapshot(&frame).await,
            "/start" => self.start(&frame).await,
            "/stop" => self.stop(&frame).await,
            "/exception" => self.exception(&frame),
            dest => {
                if let Some(detail) = dest.strip_prefix("/hello/") {
                    self.detail(&frame, detail).await
                } else {
                    Err(RelayError::UnknownDestination(dest.to_string()))
                }
            }
        }
    }

    /// Transport disconnect hook: drop the session's task and queue
    pub async fn session_closed(&self, session_id: &str) {
        self.tasks.discard(session_id).await;
        self.dispatcher.detach(session_id).await;
    }

    async fn basic(&self, frame: &InboundFrame) -> Result<()> {
        let reply = Reply::new(frame.body.message.to_uppercase());
        self.broadcast_reply(reply).await
    }

    async fn detail(&self, frame: &InboundFrame, detail: &str) -> Result<()> {
        tracing::info!(detail = %detail, "Destination variable extracted");
        let reply = Reply::new(frame.body.message.to_uppercase());
        self.broadcast_reply(reply).await
    }

    async fn broadcast_reply(&self, reply: Reply) -> Result<()> {
        let payload = serde_json::to_value(&reply)?;
        self.dispatcher
            .broadcast(&self.config.broadcast_channels, payload)
            .await;
        Ok(())
    }

    async fn snapshot(&self, frame: &InboundFrame) -> Result<()> {
        let session_id = require_session(frame)?;
        let snapshot = SessionSnapshot::new(self.sessions.sessions().await, session_id.clone());
        let payload = serde_json::to_value(&snapshot)?;
        self.dispatcher
            .unicast(&session_id, &self.config.sessions_queue, payload)
            .await;
        Ok(())
    }

    async fn start(&self, frame: &InboundFrame) -> Result<()> {
        let session_id = require_session(frame)?;

        let dispatcher = self.dispatcher.clone();
        let queue = self.config.trade_queue.clone();
        let target = session_id.clone();
        let work: TickFn = Box::new(move || {
            let dispatcher = dispatcher.clone();
            let queue = queue.clone();
            let target = target.clone();
            Box::pin(async move {
                let price: u32 = rand::thread_rng().gen_range(0..100);
                dispatcher.unicast(&target, &queue, serde_json::json!(price)).await;
            })
        });

        let handle = self
            .scheduler
            .schedule_recurring(self.config.tick_interval, work);
        self.tasks.install(session_id, handle).await;
        Ok(())
    }

    async fn stop(&self, frame: &InboundFrame) -> Result<()> {
        let session_id = require_session(frame)?;
        self.tasks.cancel(&session_id).await
    }

    /// Fault-injection test hook: always fails, kind chosen by message text
    fn exception(&self, frame: &InboundFrame) -> Result<()> {
        Err(RelayError::Fault(FaultKind::from_message(
            &frame.body.message,
        )))
    }
}

fn require_session(frame: &InboundFrame) -> Result<SessionId> {
    frame
        .session_id
        .clone()
        .ok_or(RelayError::MissingSessionId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemorySessionRegistry;
    use crate::types::MessageBody;

    fn test_router(registry: MemorySessionRegistry) -> (Router, Dispatcher) {
        let dispatcher = Dispatcher::new();
        let router = Router::new(
            dispatcher.clone(),
            Arc::new(registry),
            SessionTaskRegistry::new(),
            TaskScheduler::new(),
            RelayConfig::default(),
        );
        (router, dispatcher)
    }

    #[tokio::test]
    async fn test_basic_uppercases_and_broadcasts() {
        let (router, dispatcher) = test_router(MemorySessionRegistry::new());
        let mut rx = dispatcher.subscribe("/topic/hello").await;
        let mut rx2 = dispatcher.subscribe("/topic/hello2").await;

        router
            .handle(InboundFrame::new("/hello", MessageBody::new("hi there")))
            .await
            .unwrap();

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame.payload["message"], "HI THERE");
        assert!(frame.payload["timestamp"].is_string());
        assert_eq!(rx2.recv().await.unwrap().payload["message"], "HI THERE");
    }

    #[tokio::test]
    async fn test_detail_extracts_segment() {
        let (router, dispatcher) = test_router(MemorySessionRegistry::new());
        let mut rx = dispatcher.subscribe("/topic/hello").await;

        router
            .handle(InboundFrame::new("/hello/order-42", MessageBody::new("x")))
            .await
            .unwrap();

        // Payload shape is unchanged by the variable segment.
        assert_eq!(rx.recv().await.unwrap().payload["message"], "X");
    }

    #[tokio::test]
    async fn test_unknown_destination() {
        let (router, _) = test_router(MemorySessionRegistry::new());
        let err = router
            .handle(InboundFrame::new("/nope", MessageBody::new("x")))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::UnknownDestination(d) if d == "/nope"));
    }

    #[tokio::test]
    async fn test_session_ops_require_session_id() {
        let (router, _) = test_router(MemorySessionRegistry::new());
        for dest in ["/sessions", "/start", "/stop"] {
            let err = router
                .handle(InboundFrame::new(dest, MessageBody::new("x")))
                .await
                .unwrap_err();
            assert!(matches!(err, RelayError::MissingSessionId), "{dest}");
        }
    }

    #[tokio::test]
    async fn test_exception_kinds() {
        let (router, _) = test_router(MemorySessionRegistry::new());
        let cases = [
            ("runtime", FaultKind::Runtime),
            ("nullPointer", FaultKind::NullReference),
            ("io", FaultKind::Io),
            ("exception", FaultKind::Generic),
            ("whatever", FaultKind::InvalidParameter),
        ];
        for (message, kind) in cases {
            let err = router
                .handle(InboundFrame::new("/exception", MessageBody::new(message)))
                .await
                .unwrap_err();
            assert!(matches!(err, RelayError::Fault(k) if k == kind), "{message}");
        }
    }

    #[tokio::test]
    async fn test_fault_leaves_other_sessions_untouched() {
        let (router, _) = test_router(MemorySessionRegistry::new());
        router
            .handle(InboundFrame::new("/start", MessageBody::new("go")).with_session("s1"))
            .await
            .unwrap();

        let _ = router
            .handle(InboundFrame::new("/exception", MessageBody::new("runtime")).with_session("s2"))
            .await;

        // s1's ticker survives s2's fault.
        router
            .handle(InboundFrame::new("/stop", MessageBody::new("halt")).with_session("s1"))
            .await
            .unwrap();
    }
}
