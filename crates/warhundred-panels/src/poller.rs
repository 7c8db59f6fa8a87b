//! Fixed-interval refresh of a panel.
//!
//! A poller is a plain timer: fetch once right away, then once per
//! interval. Every tick spawns its own fetch task, so a slow response
//! never delays the next tick, and overlapping fetches are neither merged
//! nor cancelled. Whichever finishes last writes the panel state.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::Refresh;

/// How often panels reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

impl PollConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Shortest interval accepted; anything faster is clamped up.
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Clamps the interval to at least [`Self::MIN_INTERVAL`].
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_millis() as u64,
                min_ms = Self::MIN_INTERVAL.as_millis() as u64,
                "poll interval too short, clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

/// Keeps a poller alive. Dropping it stops the timer; fetches already in
/// flight still complete.
#[derive(Debug)]
pub struct PollerHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stops the timer now. Same as dropping the handle.
    pub fn stop(self) {}

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!(panel = self.name, "poller stopped");
    }
}

/// Starts refreshing `panel` on a timer. Must be called from within a
/// Tokio runtime.
pub fn spawn_poller<P: Refresh>(panel: P, config: PollConfig) -> PollerHandle {
    let config = config.validated();
    let name = panel.name();
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(panel = name, interval = ?config.interval, "poller started");

        loop {
            ticker.tick().await;
            let panel = panel.clone();
            tokio::spawn(async move { panel.refresh().await });
        }
    });
    PollerHandle { name, task }
}
