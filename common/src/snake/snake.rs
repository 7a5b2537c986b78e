use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Snake body, head first. `body_set` mirrors `body` for O(1) occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(start_pos: Point) -> Self {
        Self::from_segments([start_pos])
    }

    /// Builds a snake from segments given head first. Duplicate cells are skipped.
    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        for segment in segments {
            if body_set.insert(segment) {
                body.push_back(segment);
            }
        }
        assert!(!body.is_empty(), "Snake must have at least one segment");
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn occupied(&self) -> &HashSet<Point> {
        &self.body_set
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// True when moving the head onto `point` would hit the body. The tail is
    /// excluded because it is vacated in the same step unless the snake grows.
    pub fn collides_with_body(&self, point: &Point) -> bool {
        self.body_set.contains(point) && *point != self.tail()
    }

    /// Moves the head onto `new_head`, dropping the tail unless `grow` is set.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }
}
