mod file_io;
mod player;
mod recorder;

use serde::{Deserialize, Serialize};

use crate::snake::{Direction, SimulationSettings};

pub use file_io::{
    ReplayError, generate_replay_filename, load_replay, load_replay_from_str, save_replay,
    save_replay_to_string,
};
pub use player::ReplayPlayer;
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u32 = 1;

/// A direction request the engine accepted while its tick counter read `tick`.
/// It takes effect on tick `tick + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAction {
    pub tick: u64,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub version: u32,
    pub engine_version: String,
    pub recorded_at: String,
    pub seed: u64,
    pub settings: SimulationSettings,
    pub actions: Vec<TurnAction>,
    pub final_score: u32,
    pub final_tick: u64,
}
