use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{Validate, check_range};
use super::types::FieldSize;

pub const DEFAULT_FIELD_WIDTH: usize = 20;
pub const DEFAULT_FIELD_HEIGHT: usize = 20;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;
pub const DEFAULT_FOOD_SCORE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputBuffering {
    /// Only the most recent accepted request is kept until the next tick.
    LatestOnly,
    /// Up to `capacity` turns are kept and committed one per tick.
    Queued { capacity: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub tick_interval_ms: u64,
    pub food_score: u32,
    pub input_buffering: InputBuffering,
}

impl SimulationSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Validate for SimulationSettings {
    fn validate(&self) -> Result<(), String> {
        check_range("field_width", self.field_width, 5, 100)?;
        check_range("field_height", self.field_height, 5, 100)?;
        check_range("tick_interval_ms", self.tick_interval_ms, 20, 5000)?;
        if self.food_score == 0 {
            return Err("food_score must be at least 1".to_string());
        }
        if let InputBuffering::Queued { capacity } = self.input_buffering {
            check_range("input_buffering.capacity", capacity, 1, 16)?;
        }
        Ok(())
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_score: DEFAULT_FOOD_SCORE,
            input_buffering: InputBuffering::LatestOnly,
        }
    }
}
