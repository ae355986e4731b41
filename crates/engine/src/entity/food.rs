//! Food and special food.

use super::{Entity, EntityKind};
use protocol::Position;

/// The regular food pellet. Exactly one exists while placement succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Entity for Food {
    fn position(&self) -> Position {
        self.position
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Food
    }
}

/// Rare, higher-value food. Stays until eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialFood {
    pub position: Position,
}

impl SpecialFood {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Entity for SpecialFood {
    fn position(&self) -> Position {
        self.position
    }

    fn kind(&self) -> EntityKind {
        EntityKind::SpecialFood
    }
}
