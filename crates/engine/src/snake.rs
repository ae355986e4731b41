//! The player snake.

use protocol::{Direction, Position};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Snake {
    /// Head first.
    body: VecDeque<Position>,
    direction: Direction,
    /// Applied at the start of the next move.
    pending: Direction,
}

impl Snake {
    pub fn new(head: Position, direction: Direction) -> Self {
        let mut body = VecDeque::with_capacity(64);
        body.push_back(head);
        Self {
            body,
            direction,
            pending: direction,
        }
    }

    #[inline]
    pub fn head(&self) -> Position {
        // Never empty: constructed with a head, and `advance` pushes before it pops.
        self.body[0]
    }

    #[inline]
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    #[inline]
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a heading change. Reversals of the heading currently travelled
    /// are ignored and the previous intent is kept.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Commit the pending heading and return the cell the head moves into.
    pub fn next_head(&mut self) -> Position {
        self.direction = self.pending;
        self.head() + self.direction.vector()
    }

    /// Prepend `head`. The tail is kept when `grow` is set.
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            self.body.pop_back();
        }
    }
}
