//! Static obstacle.

use super::{Entity, EntityKind};
use protocol::Position;

/// A wall block placed at session start. Never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Position,
}

impl Obstacle {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Entity for Obstacle {
    fn position(&self) -> Position {
        self.position
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }
}
