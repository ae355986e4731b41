//! Board dimensions and the entity set.

use crate::entity::{Critter, EntityRef, Food, Obstacle, SpecialFood};
use protocol::Position;
use rand::Rng;

/// Immutable board dimensions. The only source of truth for bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWorld {
    width: i32,
    height: i32,
}

impl GridWorld {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must be non-empty");
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Wrap each axis independently onto the opposite edge.
    #[inline]
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    #[inline]
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(pos.x.clamp(0, self.width - 1), pos.y.clamp(0, self.height - 1))
    }

    /// Row-major cell index. `pos` must be inside the grid.
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos));
        (pos.y * self.width + pos.x) as usize
    }

    /// Uniformly random cell.
    #[inline]
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.random_range(0..self.width), rng.random_range(0..self.height))
    }
}

/// Chebyshev (king-move) distance between two cells.
#[inline]
pub fn chebyshev(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// All non-snake entities on the board.
#[derive(Debug, Clone)]
pub struct World {
    pub grid: GridWorld,
    food: Option<Food>,
    special_food: Option<SpecialFood>,
    obstacles: Vec<Obstacle>,
    critters: Vec<Critter>,
}

impl World {
    pub fn new(grid: GridWorld) -> Self {
        Self {
            grid,
            food: None,
            special_food: None,
            obstacles: Vec::with_capacity(16),
            critters: Vec::with_capacity(8),
        }
    }

    /// Drop every entity (session restart).
    pub fn clear(&mut self) {
        self.food = None;
        self.special_food = None;
        self.obstacles.clear();
        self.critters.clear();
    }

    #[inline]
    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn set_food(&mut self, position: Position) {
        self.food = Some(Food::new(position));
    }

    pub fn take_food(&mut self) -> Option<Food> {
        self.food.take()
    }

    #[inline]
    pub fn special_food(&self) -> Option<&SpecialFood> {
        self.special_food.as_ref()
    }

    pub fn set_special_food(&mut self, position: Position) {
        self.special_food = Some(SpecialFood::new(position));
    }

    pub fn take_special_food(&mut self) -> Option<SpecialFood> {
        self.special_food.take()
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn add_obstacle(&mut self, position: Position) {
        self.obstacles.push(Obstacle::new(position));
    }

    #[inline]
    pub fn critters(&self) -> &[Critter] {
        &self.critters
    }

    #[inline]
    pub fn critters_mut(&mut self) -> &mut [Critter] {
        &mut self.critters
    }

    pub fn add_critter(&mut self, critter: Critter) {
        self.critters.push(critter);
    }

    /// Remove a critter, keeping the order of the others.
    pub fn remove_critter(&mut self, index: usize) -> Option<Critter> {
        (index < self.critters.len()).then(|| self.critters.remove(index))
    }

    /// Every entity, in collision precedence order: obstacles, food, special
    /// food, then critters from the most recently added to the oldest.
    pub fn iter_entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.obstacles
            .iter()
            .map(EntityRef::Obstacle)
            .chain(self.food.iter().map(EntityRef::Food))
            .chain(self.special_food.iter().map(EntityRef::SpecialFood))
            .chain(
                self.critters
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(index, critter)| EntityRef::Critter { index, critter }),
            )
    }

    /// Entities occupying `pos`, in collision precedence order.
    pub fn entities_at(&self, pos: Position) -> impl Iterator<Item = EntityRef<'_>> {
        self.iter_entities().filter(move |e| e.position() == pos)
    }
}
