//! Board entities.
//!
//! Everything that can occupy a cell besides the snake: food, special food,
//! obstacles and critters. [`EntityRef`] is the tagged view used wherever the
//! kinds are handled together (collision dispatch, placement exclusion).

mod critter;
mod food;
mod obstacle;

pub use critter::Critter;
pub use food::{Food, SpecialFood};
pub use obstacle::Obstacle;

use protocol::Position;

/// Entity kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Food,
    SpecialFood,
    Obstacle,
    Critter,
}

impl EntityKind {
    /// Whether the snake head consumes this kind on contact.
    #[inline]
    pub fn is_consumable(self) -> bool {
        !matches!(self, EntityKind::Obstacle)
    }
}

/// Trait for all board entities.
pub trait Entity {
    fn position(&self) -> Position;

    fn kind(&self) -> EntityKind;
}

/// A borrowed board entity.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Food(&'a Food),
    SpecialFood(&'a SpecialFood),
    Obstacle(&'a Obstacle),
    /// `index` is the critter's slot in the world's critter list.
    Critter { index: usize, critter: &'a Critter },
}

impl EntityRef<'_> {
    pub fn position(&self) -> Position {
        match self {
            EntityRef::Food(e) => e.position(),
            EntityRef::SpecialFood(e) => e.position(),
            EntityRef::Obstacle(e) => e.position(),
            EntityRef::Critter { critter, .. } => critter.position(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Food(e) => e.kind(),
            EntityRef::SpecialFood(e) => e.kind(),
            EntityRef::Obstacle(e) => e.kind(),
            EntityRef::Critter { critter, .. } => critter.kind(),
        }
    }
}
