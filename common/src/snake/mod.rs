mod bot_controller;
mod broadcaster;
mod engine;
mod input;
mod scheduler;
mod session;
mod settings;
mod snake;
mod state;
mod types;

pub use bot_controller::BotController;
pub use broadcaster::{StateBroadcaster, WatchBroadcaster};
pub use engine::{INITIAL_DIRECTION, SnakeEngine};
pub use input::InputController;
pub use scheduler::{SharedEngine, TickScheduler};
pub use session::SimulationSession;
pub use settings::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_FOOD_SCORE, DEFAULT_TICK_INTERVAL_MS,
    InputBuffering, SimulationSettings,
};
pub use snake::Snake;
pub use state::{GameOverSummary, SimulationState};
pub use types::{Direction, FieldSize, GameEndReason, Point, RunStatus};
