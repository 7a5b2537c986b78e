use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::{debug_log, log};
use super::broadcaster::StateBroadcaster;
use super::engine::SnakeEngine;
use super::state::GameOverSummary;
use super::types::RunStatus;

pub type SharedEngine = Arc<Mutex<SnakeEngine>>;

/// Drives `SnakeEngine::tick` at a fixed period from one background task.
/// At most one tick task exists per scheduler; starting again stops the
/// previous one first.
pub struct TickScheduler {
    tick_interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            handle: None,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub async fn start<B: StateBroadcaster>(&mut self, engine: SharedEngine, broadcaster: B) {
        self.stop().await;
        let period = self.tick_interval;
        self.handle = Some(tokio::spawn(run_ticks(engine, broadcaster, period)));
        debug_log!("Tick scheduler started ({} ms)", period.as_millis());
    }

    /// Cancels the tick task and waits until it is gone.
    pub async fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            debug_log!("Tick scheduler stopped");
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run_ticks<B: StateBroadcaster>(engine: SharedEngine, broadcaster: B, period: Duration) {
    // First tick one period after start, like a plain repeating timer.
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;

        let state = {
            let mut engine = engine.lock().await;
            // Status is checked under the lock so a pause or reset that got
            // there first is never overtaken by a stale tick.
            if engine.status() != RunStatus::Running {
                break;
            }
            engine.tick()
        };

        let finished = state.status == RunStatus::Over;
        let summary = GameOverSummary::from_state(&state);
        broadcaster.broadcast_state(state).await;

        if finished {
            if let Some(summary) = summary {
                log!(
                    "Run finished: {:?}, score {}, length {}, {} ticks",
                    summary.reason,
                    summary.score,
                    summary.length,
                    summary.ticks
                );
                broadcaster.broadcast_game_over(summary).await;
            }
            break;
        }
    }
}
