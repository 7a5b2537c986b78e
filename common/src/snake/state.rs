use serde::{Deserialize, Serialize};

use super::types::{Direction, FieldSize, GameEndReason, Point, RunStatus};

/// Read-only snapshot handed to whatever observes the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub field_size: FieldSize,
    /// Head first.
    pub snake: Vec<Point>,
    /// `None` only once the snake has filled the board.
    pub food: Option<Point>,
    pub direction: Direction,
    pub score: u32,
    pub status: RunStatus,
    pub end_reason: Option<GameEndReason>,
    pub tick: u64,
}

impl SimulationState {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }

    pub fn is_over(&self) -> bool {
        self.status == RunStatus::Over
    }

    pub fn is_won(&self) -> bool {
        self.end_reason == Some(GameEndReason::BoardFilled)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub reason: GameEndReason,
}

impl GameOverSummary {
    pub fn from_state(state: &SimulationState) -> Option<Self> {
        let reason = state.end_reason?;
        Some(Self {
            score: state.score,
            length: state.snake.len(),
            ticks: state.tick,
            reason,
        })
    }
}
