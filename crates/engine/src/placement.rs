//! Procedural entity placement.
//!
//! Every placement is bounded rejection sampling: draw uniform cells until
//! one passes the kind's exclusion rules or the attempt budget runs out. On
//! exhaustion nothing is placed and the caller carries on without it.

use crate::config::{CritterConfig, EntityConfig};
use crate::entity::{Critter, EntityKind, EntityRef};
use crate::snake::Snake;
use crate::world::{GridWorld, World, chebyshev};
use fixedbitset::FixedBitSet;
use protocol::Position;
use rand::Rng;
use tracing::{debug, warn};

/// Draw up to `attempts` uniform cells and return the first accepted one.
pub fn sample<R, F>(grid: &GridWorld, rng: &mut R, attempts: u32, mut accept: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: FnMut(Position) -> bool,
{
    (0..attempts)
        .map(|_| grid.random_position(rng))
        .find(|&pos| accept(pos))
}

/// Places food, special food, obstacles and critters.
#[derive(Debug, Clone)]
pub struct EntityPlacer {
    attempts: u32,
    obstacle_clearance: i32,
    special_food_chance: f64,
}

impl EntityPlacer {
    pub fn new(config: &EntityConfig) -> Self {
        Self {
            attempts: config.placement_attempts,
            obstacle_clearance: config.obstacle_clearance,
            special_food_chance: config.special_food_chance,
        }
    }

    /// Cells a new entity of `kind` may not take.
    ///
    /// - everything: live snake segments
    /// - food: obstacles, special food
    /// - special food: obstacles, critters, food
    /// - obstacle: other obstacles, food, special food
    /// - critter: obstacles, food
    fn blocked_cells(kind: EntityKind, snake: &Snake, world: &World) -> FixedBitSet {
        let grid = &world.grid;
        let mut blocked = FixedBitSet::with_capacity(grid.cell_count());
        for &segment in snake.body() {
            if grid.contains(segment) {
                blocked.insert(grid.index(segment));
            }
        }
        for entity in world.iter_entities() {
            let excluded = match (kind, entity) {
                (_, EntityRef::Obstacle(_)) => true,
                (EntityKind::Food, EntityRef::SpecialFood(_)) => true,
                (EntityKind::SpecialFood, EntityRef::Food(_) | EntityRef::Critter { .. }) => true,
                (EntityKind::Obstacle, EntityRef::Food(_) | EntityRef::SpecialFood(_)) => true,
                (EntityKind::Critter, EntityRef::Food(_)) => true,
                _ => false,
            };
            if excluded {
                blocked.insert(grid.index(entity.position()));
            }
        }
        blocked
    }

    /// Find a free cell for a new entity of `kind`.
    pub fn place<R: Rng + ?Sized>(
        &self,
        kind: EntityKind,
        snake: &Snake,
        world: &World,
        rng: &mut R,
    ) -> Option<Position> {
        let blocked = Self::blocked_cells(kind, snake, world);
        let head = snake.head();
        let found = sample(&world.grid, rng, self.attempts, |pos| {
            !blocked.contains(world.grid.index(pos))
                && (kind != EntityKind::Obstacle || chebyshev(pos, head) >= self.obstacle_clearance)
        });
        if found.is_none() {
            warn!("No free cell for {:?} after {} attempts, skipping", kind, self.attempts);
        }
        found
    }

    /// Put the food somewhere new. Leaves the board without food on exhaustion.
    pub fn respawn_food<R: Rng + ?Sized>(&self, snake: &Snake, world: &mut World, rng: &mut R) -> Option<Position> {
        world.take_food();
        let pos = self.place(EntityKind::Food, snake, world, rng)?;
        world.set_food(pos);
        Some(pos)
    }

    /// Try to place up to `count` obstacles. Returns how many were placed.
    pub fn spawn_obstacles<R: Rng + ?Sized>(
        &self,
        count: usize,
        snake: &Snake,
        world: &mut World,
        rng: &mut R,
    ) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            if let Some(pos) = self.place(EntityKind::Obstacle, snake, world, rng) {
                world.add_obstacle(pos);
                placed += 1;
            }
        }
        debug!("Placed {}/{} obstacles", placed, count);
        placed
    }

    /// Try to place up to `count` critters with staggered first countdowns.
    pub fn spawn_critters<R: Rng + ?Sized>(
        &self,
        count: usize,
        timers: &CritterConfig,
        snake: &Snake,
        world: &mut World,
        rng: &mut R,
    ) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            if let Some(pos) = self.place(EntityKind::Critter, snake, world, rng) {
                let timer = if timers.initial_timer_max > 0 {
                    rng.random_range(0..timers.initial_timer_max)
                } else {
                    0
                };
                world.add_critter(Critter::new(pos, timer));
                placed += 1;
            }
        }
        debug!("Placed {}/{} critters", placed, count);
        placed
    }

    /// Roll the special-food chance and place one on success.
    pub fn maybe_spawn_special_food<R: Rng + ?Sized>(
        &self,
        snake: &Snake,
        world: &mut World,
        rng: &mut R,
    ) -> Option<Position> {
        if !rng.random_bool(self.special_food_chance) {
            return None;
        }
        let pos = self.place(EntityKind::SpecialFood, snake, world, rng)?;
        world.set_special_food(pos);
        Some(pos)
    }
}
