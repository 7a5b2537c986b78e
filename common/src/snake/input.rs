use ringbuffer::{AllocRingBuffer, RingBuffer};

use super::settings::InputBuffering;
use super::types::Direction;

enum PendingInput {
    Latest(Option<Direction>),
    Queued(AllocRingBuffer<Direction>),
}

/// Buffers directional input between ticks.
///
/// The committed direction is the one applied by the most recent tick. A
/// request that would reverse it is discarded, so a burst of inputs inside a
/// single tick window can never turn the snake back onto its own neck.
pub struct InputController {
    committed: Direction,
    pending: PendingInput,
}

impl InputController {
    pub fn new(initial: Direction, buffering: InputBuffering) -> Self {
        let pending = match buffering {
            InputBuffering::LatestOnly => PendingInput::Latest(None),
            InputBuffering::Queued { capacity } => {
                PendingInput::Queued(AllocRingBuffer::new(capacity.max(1)))
            }
        };
        Self {
            committed: initial,
            pending,
        }
    }

    pub fn committed(&self) -> Direction {
        self.committed
    }

    /// The direction the next tick will commit, if any input is waiting.
    pub fn pending(&self) -> Option<Direction> {
        match &self.pending {
            PendingInput::Latest(pending) => *pending,
            PendingInput::Queued(queue) => queue.front().copied(),
        }
    }

    pub fn pending_count(&self) -> usize {
        match &self.pending {
            PendingInput::Latest(pending) => usize::from(pending.is_some()),
            PendingInput::Queued(queue) => queue.len(),
        }
    }

    /// Returns whether the request was kept.
    pub fn request(&mut self, direction: Direction) -> bool {
        match &mut self.pending {
            PendingInput::Latest(pending) => {
                if direction.is_opposite(&self.committed) {
                    return false;
                }
                *pending = Some(direction);
                true
            }
            PendingInput::Queued(queue) => {
                let reference = queue.back().copied().unwrap_or(self.committed);
                if direction == reference || direction.is_opposite(&reference) || queue.is_full() {
                    return false;
                }
                queue.enqueue(direction);
                true
            }
        }
    }

    /// Applies the next pending direction and returns the direction for this tick.
    pub fn commit(&mut self) -> Direction {
        let next = match &mut self.pending {
            PendingInput::Latest(pending) => pending.take(),
            PendingInput::Queued(queue) => queue.dequeue(),
        };
        if let Some(direction) = next
            && !direction.is_opposite(&self.committed)
        {
            self.committed = direction;
        }
        self.committed
    }

    pub fn reset(&mut self, initial: Direction) {
        self.committed = initial;
        match &mut self.pending {
            PendingInput::Latest(pending) => *pending = None,
            PendingInput::Queued(queue) => queue.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_of_committed_is_ignored() {
        let mut input = InputController::new(Direction::Right, InputBuffering::LatestOnly);
        assert!(!input.request(Direction::Left));
        assert_eq!(input.pending(), None);
        assert_eq!(input.commit(), Direction::Right);
    }

    #[test]
    fn test_last_write_wins() {
        let mut input = InputController::new(Direction::Right, InputBuffering::LatestOnly);
        assert!(input.request(Direction::Up));
        assert!(input.request(Direction::Down));
        assert_eq!(input.pending(), Some(Direction::Down));
        assert_eq!(input.commit(), Direction::Down);
        assert_eq!(input.pending(), None);
    }

    #[test]
    fn test_reversal_checked_against_committed_not_pending() {
        // Up is pending, Left would reverse the committed Right.
        let mut input = InputController::new(Direction::Right, InputBuffering::LatestOnly);
        assert!(input.request(Direction::Up));
        assert!(!input.request(Direction::Left));
        assert_eq!(input.commit(), Direction::Up);
    }

    #[test]
    fn test_commit_without_input_keeps_direction() {
        let mut input = InputController::new(Direction::Up, InputBuffering::LatestOnly);
        assert_eq!(input.commit(), Direction::Up);
        assert_eq!(input.committed(), Direction::Up);
    }

    #[test]
    fn test_queued_turns_commit_one_per_tick() {
        let mut input =
            InputController::new(Direction::Right, InputBuffering::Queued { capacity: 3 });
        assert!(input.request(Direction::Up));
        assert!(input.request(Direction::Left));
        assert_eq!(input.pending_count(), 2);
        assert_eq!(input.commit(), Direction::Up);
        assert_eq!(input.commit(), Direction::Left);
        assert_eq!(input.commit(), Direction::Left);
    }

    #[test]
    fn test_queued_rejects_reverse_of_last_queued() {
        let mut input =
            InputController::new(Direction::Right, InputBuffering::Queued { capacity: 3 });
        assert!(input.request(Direction::Up));
        assert!(!input.request(Direction::Down));
        assert!(!input.request(Direction::Up));
        assert_eq!(input.pending_count(), 1);
    }

    #[test]
    fn test_queued_drops_when_full() {
        let mut input =
            InputController::new(Direction::Right, InputBuffering::Queued { capacity: 2 });
        assert!(input.request(Direction::Up));
        assert!(input.request(Direction::Left));
        assert!(!input.request(Direction::Down));
        assert_eq!(input.pending_count(), 2);
    }

    #[test]
    fn test_reset_clears_pending() {
        let mut input =
            InputController::new(Direction::Up, InputBuffering::Queued { capacity: 2 });
        input.request(Direction::Left);
        input.reset(Direction::Right);
        assert_eq!(input.pending(), None);
        assert_eq!(input.committed(), Direction::Right);
    }
}
