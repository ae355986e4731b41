//! Head collision resolution.
//!
//! The proposed head is checked in a fixed order:
//! 1. Bounds: terminal, or wrapped while phasing
//! 2. Obstacles: terminal unless phasing
//! 3. Own body (before the new head is added): terminal unless phasing
//! 4. Consumables: food, then special food, then critters newest first

use crate::entity::EntityRef;
use crate::snake::Snake;
use crate::world::World;
use protocol::{DeathCause, Position};

/// What the head consumed on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Food,
    SpecialFood,
    /// Index into the world's critter list.
    Critter(usize),
}

/// Result of resolving one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The move ends the session.
    Terminal(DeathCause),
    /// The head survives at `head` (already wrapped if needed).
    Moved { head: Position, consumed: Option<Consumed> },
}

impl Resolution {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Resolution::Terminal(_))
    }
}

/// Resolve `proposed` against the board. `phasing` is the phase dash state.
pub fn resolve(proposed: Position, phasing: bool, snake: &Snake, world: &World) -> Resolution {
    let mut head = proposed;
    if !world.grid.contains(head) {
        if !phasing {
            return Resolution::Terminal(DeathCause::Wall);
        }
        head = world.grid.wrap(head);
    }

    if !phasing {
        if world
            .entities_at(head)
            .any(|e| matches!(e, EntityRef::Obstacle(_)))
        {
            return Resolution::Terminal(DeathCause::Obstacle);
        }
        if snake.occupies(head) {
            return Resolution::Terminal(DeathCause::SelfCollision);
        }
    }

    let consumed = world
        .entities_at(head)
        .filter(|e| e.kind().is_consumable())
        .find_map(|e| match e {
            EntityRef::Food(_) => Some(Consumed::Food),
            EntityRef::SpecialFood(_) => Some(Consumed::SpecialFood),
            EntityRef::Critter { index, .. } => Some(Consumed::Critter(index)),
            EntityRef::Obstacle(_) => None,
        });

    Resolution::Moved { head, consumed }
}
