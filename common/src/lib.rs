//! Single-player snake simulation: a deterministic, tick-driven grid engine
//! with input buffering, a timer-driven scheduler, and seeded replays.

pub mod config;
pub mod logger;
pub mod replay;
pub mod session_rng;
pub mod snake;

pub mod version {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

pub use session_rng::SessionRng;
pub use snake::{
    Direction, FieldSize, GameEndReason, GameOverSummary, InputBuffering, Point, RunStatus,
    SimulationSession, SimulationSettings, SimulationState, SnakeEngine,
};
