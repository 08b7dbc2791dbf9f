//! One-second tick scheduler

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::{interval_at, Instant, MissedTickBehavior}};
use tracing::debug;

/// Tick cadence
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A tick produced by a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Id of the registration that produced this tick
    pub registration: u64,
}

/// Live recurring tick registration.
///
/// Dropping the handle cancels the registration.
#[derive(Debug)]
pub struct TickHandle {
    id: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop producing ticks
    pub fn cancel(self) {
        debug!("Cancelling tick registration {}", self.id);
        // Drop aborts the task
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Produces tick events for the event loop
#[derive(Debug)]
pub struct TickScheduler {
    tx: mpsc::UnboundedSender<TickEvent>,
    next_id: u64,
}

impl TickScheduler {
    /// Create a scheduler and the receiver its ticks arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, next_id: 1 }, rx)
    }

    /// Register a recurring tick. The first tick fires one period from now.
    pub fn schedule(&mut self) -> TickHandle {
        let id = self.next_id;
        self.next_id += 1;

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(TickEvent { registration: id }).is_err() {
                    break;
                }
            }
        });

        debug!("Registered tick {}", id);
        TickHandle { id, task }
    }
}
