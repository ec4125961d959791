//! Router configuration

use std::time::Duration;

/// Channel names and timing for the routing core
///
/// Defaults mirror the conventional layout: two broadcast topics for
/// `/hello` replies, per-session queues for snapshots and trade ticks,
/// and a 3 second tick interval.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Interval between recurring-task firings
    pub tick_interval: Duration,

    /// Broadcast channels that receive `/hello` replies
    pub broadcast_channels: Vec<String>,

    /// Per-session private channel for session snapshots
    pub sessions_queue: String,

    /// Per-session private channel for recurring trade ticks
    pub trade_queue: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(3),
            broadcast_channels: vec!["/topic/hello".to_string(), "/topic/hello2".to_string()],
            sessions_queue: "/queue/sessions".to_string(),
            trade_queue: "/queue/trade".to_string(),
        }
    }
}

impl RelayConfig {
    /// Override the tick interval (short intervals keep tests fast)
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}
