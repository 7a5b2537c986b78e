use crate::debug_log;
use crate::session_rng::SessionRng;
use crate::snake::{RunStatus, SimulationState, SnakeEngine};
use super::{Replay, TurnAction};

pub struct ReplayPlayer {
    replay: Replay,
    current_action_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Self {
        Self {
            replay,
            current_action_index: 0,
        }
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    pub fn is_finished(&self) -> bool {
        self.current_action_index >= self.replay.actions.len()
    }

    /// Actions recorded at `tick`. Older unconsumed actions are skipped and logged.
    pub fn actions_for_tick(&mut self, tick: u64) -> Vec<TurnAction> {
        let mut actions = Vec::new();
        while let Some(action) = self.replay.actions.get(self.current_action_index) {
            if action.tick > tick {
                break;
            }
            if action.tick == tick {
                actions.push(*action);
            } else {
                debug_log!(
                    "Skipping replay action #{} ({:?} at tick {}), already at tick {}",
                    self.current_action_index,
                    action.direction,
                    action.tick,
                    tick
                );
            }
            self.current_action_index += 1;
        }
        actions
    }

    pub fn rewind(&mut self) {
        self.current_action_index = 0;
    }

    /// Re-runs the recorded game from its seed and returns the final state.
    pub fn simulate(&mut self) -> SimulationState {
        self.rewind();
        let seed = self.replay.seed;
        let mut engine = SnakeEngine::new(&self.replay.settings, SessionRng::new(seed));
        let mut state = engine.reset_with_seed(seed);

        while state.status == RunStatus::Running && state.tick < self.replay.final_tick {
            for action in self.actions_for_tick(state.tick) {
                engine.set_direction(action.direction);
            }
            state = engine.tick();
        }

        state
    }
}
