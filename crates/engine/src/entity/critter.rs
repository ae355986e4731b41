//! Roaming critter.

use super::{Entity, EntityKind};
use protocol::{CritterView, Position};

/// An autonomous critter. Movement lives in [`crate::ai`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Critter {
    pub position: Position,
    /// Waypoint the critter is walking toward.
    pub target: Position,
    /// Ticks left before a new waypoint is picked.
    pub move_timer: u32,
}

impl Critter {
    /// A critter starts out idle: its target is its own cell.
    pub fn new(position: Position, move_timer: u32) -> Self {
        Self {
            position,
            target: position,
            move_timer,
        }
    }

    pub fn view(&self) -> CritterView {
        CritterView {
            position: self.position,
            target: self.target,
        }
    }
}

impl Entity for Critter {
    fn position(&self) -> Position {
        self.position
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Critter
    }
}
