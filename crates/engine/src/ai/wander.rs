//! Random local wandering.

use crate::world::GridWorld;
use protocol::{Direction, Position};
use rand::Rng;

/// One cell away in a random heading, clamped to the board. At an edge the
/// clamp can return `from` itself, leaving the critter idle until its next
/// re-target.
pub fn pick_waypoint<R: Rng + ?Sized>(from: Position, grid: &GridWorld, rng: &mut R) -> Position {
    let heading = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
    grid.clamp(from + heading.vector())
}

/// Move at most one cell per axis toward `target`.
#[inline]
pub fn step_toward(from: Position, target: Position) -> Position {
    from + (target - from).signum()
}
