use crate::snake::{Direction, SimulationSettings, SimulationState};
use crate::version::VERSION;
use super::{REPLAY_VERSION, Replay, TurnAction};

pub struct ReplayRecorder {
    recorded_at: String,
    seed: u64,
    settings: SimulationSettings,
    actions: Vec<TurnAction>,
}

impl ReplayRecorder {
    pub fn new(seed: u64, settings: SimulationSettings) -> Self {
        Self {
            recorded_at: chrono::Local::now().to_rfc3339(),
            seed,
            settings,
            actions: Vec::new(),
        }
    }

    pub fn record_turn(&mut self, tick: u64, direction: Direction) {
        self.actions.push(TurnAction { tick, direction });
    }

    /// Produces the replay; `final_state` bounds how far a player re-simulates.
    pub fn finalize(&self, final_state: &SimulationState) -> Replay {
        let mut actions = self.actions.clone();
        actions.sort_by_key(|a| a.tick);

        Replay {
            version: REPLAY_VERSION,
            engine_version: VERSION.to_string(),
            recorded_at: self.recorded_at.clone(),
            seed: self.seed,
            settings: self.settings.clone(),
            actions,
            final_score: final_state.score,
            final_tick: final_state.tick,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
