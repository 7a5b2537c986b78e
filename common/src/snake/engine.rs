use std::collections::HashSet;

use crate::session_rng::SessionRng;
use crate::{debug_log, log};
use super::input::InputController;
use super::settings::SimulationSettings;
use super::snake::Snake;
use super::state::SimulationState;
use super::types::{Direction, FieldSize, GameEndReason, Point, RunStatus};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Attempts of plain rejection sampling before falling back to choosing among
/// the enumerated free cells.
const FOOD_SAMPLING_ATTEMPTS: usize = 100;

/// Single-player snake simulation. All mutation goes through `reset`,
/// `start`, `set_direction`, `tick`, `pause` and `resume`.
pub struct SnakeEngine {
    field_size: FieldSize,
    food_score: u32,
    snake: Snake,
    food: Option<Point>,
    input: InputController,
    score: u32,
    status: RunStatus,
    end_reason: Option<GameEndReason>,
    tick: u64,
    rng: SessionRng,
}

impl SnakeEngine {
    /// Creates an engine already laid out as after a reset, but `Idle`:
    /// ticks are ignored until `start` or `reset`.
    pub fn new(settings: &SimulationSettings, rng: SessionRng) -> Self {
        let field_size = settings.field_size();
        let mut engine = Self {
            field_size,
            food_score: settings.food_score,
            snake: Snake::new(field_size.center()),
            food: None,
            input: InputController::new(INITIAL_DIRECTION, settings.input_buffering),
            score: 0,
            status: RunStatus::Idle,
            end_reason: None,
            tick: 0,
            rng,
        };
        engine.food = engine.place_food_avoiding_snake();
        engine
    }

    pub fn reset(&mut self) -> SimulationState {
        self.snake = Snake::new(self.field_size.center());
        self.input.reset(INITIAL_DIRECTION);
        self.score = 0;
        self.tick = 0;
        self.end_reason = None;
        self.status = RunStatus::Running;
        self.food = self.place_food_avoiding_snake();
        if self.food.is_none() {
            self.finish(GameEndReason::BoardFilled);
        }
        debug_log!("Simulation reset (seed {}), food at {:?}", self.rng.seed(), self.food);
        self.state()
    }

    /// Reseeds the food sequence before resetting, so the run can be replayed
    /// from `seed` alone.
    pub fn reset_with_seed(&mut self, seed: u64) -> SimulationState {
        self.rng.reseed(seed);
        self.reset()
    }

    /// Leaves `Idle` without re-laying the board; from `Over` this is a reset.
    pub fn start(&mut self) -> SimulationState {
        match self.status {
            RunStatus::Idle => {
                self.status = RunStatus::Running;
                self.state()
            }
            RunStatus::Over => self.reset(),
            RunStatus::Running | RunStatus::Paused => self.state(),
        }
    }

    /// Uniformly random cell of the field outside `occupied`, or `None` when
    /// `occupied` covers the whole field.
    pub fn place_food(&mut self, occupied: &HashSet<Point>) -> Option<Point> {
        Self::sample_free_cell(&mut self.rng, self.field_size, occupied)
    }

    /// Returns whether the request was kept for the next tick.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status != RunStatus::Running {
            debug_log!("Ignoring {:?} while {:?}", direction, self.status);
            return false;
        }
        self.input.request(direction)
    }

    pub fn tick(&mut self) -> SimulationState {
        if self.status != RunStatus::Running {
            return self.state();
        }

        let direction = self.input.commit();
        self.tick += 1;

        if let Err(reason) = self.advance(direction) {
            self.finish(reason);
        }

        self.state()
    }

    pub fn pause(&mut self) -> bool {
        if self.status != RunStatus::Running {
            return false;
        }
        self.status = RunStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != RunStatus::Paused {
            return false;
        }
        self.status = RunStatus::Running;
        true
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            field_size: self.field_size,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.input.committed(),
            score: self.score,
            status: self.status,
            end_reason: self.end_reason,
            tick: self.tick,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.input.pending()
    }

    fn advance(&mut self, direction: Direction) -> Result<(), GameEndReason> {
        let next_head = self
            .field_size
            .step(self.snake.head(), direction)
            .ok_or(GameEndReason::WallCollision)?;

        if self.snake.collides_with_body(&next_head) {
            return Err(GameEndReason::SelfCollision);
        }

        let ate_food = self.food == Some(next_head);
        self.snake.advance(next_head, ate_food);

        if ate_food {
            self.score += self.food_score;
            debug_log!(
                "Ate food at ({}, {}). Score: {}, length: {}",
                next_head.x,
                next_head.y,
                self.score,
                self.snake.len()
            );
            self.food = self.place_food_avoiding_snake();
            if self.food.is_none() {
                return Err(GameEndReason::BoardFilled);
            }
        }

        Ok(())
    }

    fn finish(&mut self, reason: GameEndReason) {
        self.status = RunStatus::Over;
        self.end_reason = Some(reason);
        log!(
            "Game over after {} ticks: {:?}, score {}",
            self.tick,
            reason,
            self.score
        );
    }

    fn place_food_avoiding_snake(&mut self) -> Option<Point> {
        Self::sample_free_cell(&mut self.rng, self.field_size, self.snake.occupied())
    }

    fn sample_free_cell(
        rng: &mut SessionRng,
        field_size: FieldSize,
        occupied: &HashSet<Point>,
    ) -> Option<Point> {
        if occupied.len() < field_size.cell_count() {
            for _ in 0..FOOD_SAMPLING_ATTEMPTS {
                let candidate = Point::new(
                    rng.random_range(0..field_size.width),
                    rng.random_range(0..field_size.height),
                );
                if !occupied.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        let free: Vec<Point> = field_size
            .points()
            .filter(|p| !occupied.contains(p))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[rng.random_range(0..free.len())])
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: &[Point], direction: Direction) {
        self.snake = Snake::from_segments(segments.iter().copied());
        self.input.reset(direction);
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.food = Some(food);
    }
}
