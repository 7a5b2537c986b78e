use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio_stream::wrappers::WatchStream;

use crate::log;
use crate::replay::{Replay, ReplayRecorder};
use crate::session_rng::SessionRng;
use super::broadcaster::{StateBroadcaster, WatchBroadcaster};
use super::engine::SnakeEngine;
use super::scheduler::{SharedEngine, TickScheduler};
use super::settings::SimulationSettings;
use super::state::{GameOverSummary, SimulationState};
use super::types::{Direction, RunStatus};

/// Host-facing handle for one single-player simulation.
///
/// The engine sits behind one async mutex shared by the tick task and the
/// input path, so there is exactly one writer at a time. Every run is seeded
/// (`base_seed + run index`) and recorded, so it can be replayed.
pub struct SimulationSession<B: StateBroadcaster = WatchBroadcaster> {
    settings: SimulationSettings,
    engine: SharedEngine,
    scheduler: TickScheduler,
    broadcaster: B,
    base_seed: u64,
    runs_started: u64,
    recorder: Option<ReplayRecorder>,
}

impl SimulationSession<WatchBroadcaster> {
    pub fn new(settings: SimulationSettings, seed: u64) -> Self {
        let engine = SnakeEngine::new(&settings, SessionRng::new(seed));
        let broadcaster = WatchBroadcaster::new(engine.state());
        Self::from_parts(settings, engine, broadcaster, seed)
    }

    pub fn subscribe(&self) -> watch::Receiver<SimulationState> {
        self.broadcaster.subscribe()
    }

    pub fn subscribe_game_over(&self) -> watch::Receiver<Option<GameOverSummary>> {
        self.broadcaster.subscribe_game_over()
    }

    pub fn state_stream(&self) -> WatchStream<SimulationState> {
        self.broadcaster.state_stream()
    }
}

impl<B: StateBroadcaster> SimulationSession<B> {
    pub fn with_broadcaster(settings: SimulationSettings, seed: u64, broadcaster: B) -> Self {
        let engine = SnakeEngine::new(&settings, SessionRng::new(seed));
        Self::from_parts(settings, engine, broadcaster, seed)
    }

    fn from_parts(
        settings: SimulationSettings,
        engine: SnakeEngine,
        broadcaster: B,
        base_seed: u64,
    ) -> Self {
        Self {
            scheduler: TickScheduler::new(settings.tick_interval()),
            settings,
            engine: Arc::new(Mutex::new(engine)),
            broadcaster,
            base_seed,
            runs_started: 0,
            recorder: None,
        }
    }

    /// Starts a fresh run, cancelling any tick stream of the previous one first.
    pub async fn reset(&mut self) -> SimulationState {
        self.scheduler.stop().await;

        let seed = self.base_seed.wrapping_add(self.runs_started);
        self.runs_started += 1;

        let state = self.engine.lock().await.reset_with_seed(seed);
        self.recorder = Some(ReplayRecorder::new(seed, self.settings.clone()));
        log!(
            "Run {} started on {}x{} field (seed {})",
            self.runs_started,
            state.field_size.width,
            state.field_size.height,
            seed
        );

        self.broadcaster.broadcast_state(state.clone()).await;
        if state.status == RunStatus::Running {
            self.scheduler
                .start(self.engine.clone(), self.broadcaster.clone())
                .await;
        }
        state
    }

    /// Begins a run when none is in progress; otherwise returns the current state.
    pub async fn start(&mut self) -> SimulationState {
        let status = self.engine.lock().await.status();
        match status {
            RunStatus::Idle | RunStatus::Over => self.reset().await,
            RunStatus::Running | RunStatus::Paused => self.state().await,
        }
    }

    pub async fn set_direction(&mut self, direction: Direction) -> bool {
        let mut engine = self.engine.lock().await;
        let tick = engine.tick_count();
        let accepted = engine.set_direction(direction);
        if accepted && let Some(recorder) = self.recorder.as_mut() {
            recorder.record_turn(tick, direction);
        }
        accepted
    }

    pub async fn pause(&mut self) -> bool {
        let paused = {
            let mut engine = self.engine.lock().await;
            engine.pause().then(|| engine.state())
        };
        let Some(state) = paused else {
            return false;
        };

        self.scheduler.stop().await;
        log!("Paused at tick {}", state.tick);
        self.broadcaster.broadcast_state(state).await;
        true
    }

    pub async fn resume(&mut self) -> bool {
        let resumed = {
            let mut engine = self.engine.lock().await;
            engine.resume().then(|| engine.state())
        };
        let Some(state) = resumed else {
            return false;
        };

        log!("Resumed at tick {}", state.tick);
        self.broadcaster.broadcast_state(state).await;
        self.scheduler
            .start(self.engine.clone(), self.broadcaster.clone())
            .await;
        true
    }

    /// Stops ticking. A running simulation is paused first, so `resume()`
    /// picks it up again.
    pub async fn stop(&mut self) {
        let paused = {
            let mut engine = self.engine.lock().await;
            engine.pause().then(|| engine.state())
        };
        self.scheduler.stop().await;
        if let Some(state) = paused {
            log!("Stopped at tick {}", state.tick);
            self.broadcaster.broadcast_state(state).await;
        }
    }

    pub async fn state(&self) -> SimulationState {
        self.engine.lock().await.state()
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Seed of the current run, if one was started.
    pub fn current_seed(&self) -> Option<u64> {
        self.recorder.as_ref().map(|r| r.seed())
    }

    /// Replay of the current run up to its present state.
    pub async fn replay(&self) -> Option<Replay> {
        let state = self.state().await;
        self.recorder.as_ref().map(|r| r.finalize(&state))
    }
}
