//! Recurring task scheduling
//!
//! Runs units of work on a fixed time-driven schedule, decoupled from
//! frame arrival. Each scheduled task gets a cancellable `TaskHandle`.

use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Recurring work invoked on each tick
pub type TickFn = Box<dyn FnMut() -> BoxFuture<'static, ()> + Send>;

/// Schedules recurring work on the tokio runtime
///
/// Tasks for different owners run independently and never block each
/// other; each lives on its own spawned tokio task.
#[derive(Clone, Copy, Default)]
pub struct TaskScheduler;

impl TaskScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Schedule `work` to run every `every`, starting one interval from now
    ///
    /// The first firing happens after the first interval elapses, not
    /// immediately. Firings stop once the returned handle is cancelled.
    pub fn schedule_recurring(&self, every: Duration, mut work: TickFn) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let join = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                work().await;
            }
        });

        TaskHandle { join, cancelled }
    }
}

/// Cancellable reference to one running recurring task
///
/// Exclusively owned by whoever registered the task. After `cancel`
/// returns, no further firings start; a firing already in flight may
/// complete.
#[derive(Debug)]
pub struct TaskHandle {
    join: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Stop the recurring schedule
    pub fn cancel(self) {
        // Flag first so a tick racing the abort sees the cancellation.
        self.cancelled.store(true, Ordering::SeqCst);
        self.join.abort();
    }

    /// Whether the underlying task has stopped running
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
