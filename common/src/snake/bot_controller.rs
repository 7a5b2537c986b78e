use std::collections::HashSet;

use super::state::SimulationState;
use super::types::{Direction, Point};

/// Greedy autopilot: heads for the food along safe cells, preferring cells
/// with more free neighbours when distances tie.
pub struct BotController;

impl BotController {
    pub fn calculate_move(state: &SimulationState) -> Option<Direction> {
        let head = state.head()?;
        let blocked = Self::blocked_cells(state);

        let mut best: Option<(Direction, usize, usize)> = None;
        for direction in Self::get_valid_directions(state.direction) {
            let Some(next) = state.field_size.step(head, direction) else {
                continue;
            };
            if blocked.contains(&next) {
                continue;
            }

            let distance = state
                .food
                .map(|food| next.manhattan_distance(&food))
                .unwrap_or(0);
            let exits = Self::free_neighbours(state, next, &blocked);
            // A dead end is only worth it when it is the food itself.
            let is_trap = exits == 0 && state.food != Some(next);

            let better = match best {
                None => true,
                Some((_, best_distance, best_exits)) => {
                    if is_trap {
                        false
                    } else if best_exits == 0 && exits > 0 {
                        true
                    } else {
                        distance < best_distance
                            || (distance == best_distance && exits > best_exits)
                    }
                }
            };
            if better {
                best = Some((direction, distance, exits));
            }
        }

        best.map(|(direction, _, _)| direction).or(Some(state.direction))
    }

    fn get_valid_directions(current: Direction) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |d| !d.is_opposite(&current))
    }

    /// Body cells the head may not enter next tick. The tail is free because it
    /// moves away in the same tick.
    fn blocked_cells(state: &SimulationState) -> HashSet<Point> {
        let keep = state.snake.len().saturating_sub(1);
        state.snake.iter().take(keep).copied().collect()
    }

    fn free_neighbours(state: &SimulationState, from: Point, blocked: &HashSet<Point>) -> usize {
        Direction::ALL
            .into_iter()
            .filter_map(|d| state.field_size.step(from, d))
            .filter(|p| !blocked.contains(p) && state.head() != Some(*p))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_rng::SessionRng;
    use crate::snake::{FieldSize, RunStatus, SimulationSettings, SnakeEngine};

    fn state_with(snake: Vec<Point>, food: Point, direction: Direction) -> SimulationState {
        SimulationState {
            field_size: FieldSize::new(10, 10),
            snake,
            food: Some(food),
            direction,
            score: 0,
            status: RunStatus::Running,
            end_reason: None,
            tick: 0,
        }
    }

    #[test]
    fn test_moves_towards_food() {
        let state = state_with(vec![Point::new(5, 5)], Point::new(5, 1), Direction::Right);
        assert_eq!(BotController::calculate_move(&state), Some(Direction::Up));
    }

    #[test]
    fn test_never_reverses() {
        let state = state_with(vec![Point::new(5, 5)], Point::new(1, 5), Direction::Right);
        assert_ne!(BotController::calculate_move(&state), Some(Direction::Left));
    }

    #[test]
    fn test_avoids_wall() {
        let state = state_with(vec![Point::new(9, 0)], Point::new(9, 9), Direction::Right);
        assert_eq!(BotController::calculate_move(&state), Some(Direction::Down));
    }

    #[test]
    fn test_avoids_own_body() {
        let state = state_with(
            vec![Point::new(5, 5), Point::new(5, 4), Point::new(6, 4), Point::new(6, 5), Point::new(6, 6)],
            Point::new(5, 0),
            Direction::Down,
        );
        let choice = BotController::calculate_move(&state);
        assert_ne!(choice, Some(Direction::Up));
        assert_ne!(choice, Some(Direction::Right));
    }

    #[test]
    fn test_long_bot_run_keeps_invariants() {
        let settings = SimulationSettings {
            field_width: 12,
            field_height: 12,
            ..SimulationSettings::default()
        };
        let mut engine = SnakeEngine::new(&settings, SessionRng::new(2024));
        let mut state = engine.reset();
        let mut ate_any = false;

        while state.status == RunStatus::Running && state.tick < 3000 {
            if let Some(direction) = BotController::calculate_move(&state) {
                engine.set_direction(direction);
            }
            let before = state;
            state = engine.tick();

            if state.status == RunStatus::Running {
                let ate = state.score > before.score;
                ate_any |= ate;
                assert_eq!(state.snake.len(), before.snake.len() + usize::from(ate));
                assert!(!before.direction.is_opposite(&state.direction));
            }
            if let Some(food) = state.food {
                assert!(!state.snake.contains(&food));
            }
            let unique: HashSet<Point> = state.snake.iter().copied().collect();
            assert_eq!(unique.len(), state.snake.len());
        }

        assert!(ate_any);
    }
}
