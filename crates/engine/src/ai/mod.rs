//! Critter AI.

mod wander;

pub use wander::{pick_waypoint, step_toward};

use crate::config::CritterConfig;
use crate::entity::Critter;
use crate::world::GridWorld;
use rand::Rng;

/// Drives every critter once per tick.
#[derive(Debug, Clone)]
pub struct CritterAi {
    retarget_min: u32,
    retarget_max: u32,
}

impl CritterAi {
    pub fn new(config: &CritterConfig) -> Self {
        Self {
            retarget_min: config.retarget_min,
            retarget_max: config.retarget_max,
        }
    }

    /// Count down, re-target expired critters, then step everyone one cell
    /// toward their waypoint.
    pub fn advance<R: Rng + ?Sized>(&self, critters: &mut [Critter], grid: &GridWorld, rng: &mut R) {
        for critter in critters {
            critter.move_timer = critter.move_timer.saturating_sub(1);
            if critter.move_timer == 0 {
                critter.target = pick_waypoint(critter.position, grid, rng);
                critter.move_timer = rng.random_range(self.retarget_min..self.retarget_max);
            }
            critter.position = step_toward(critter.position, critter.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_expired_timer_picks_adjacent_waypoint() {
        let ai = CritterAi::new(&CritterConfig::default());
        let grid = GridWorld::new(30, 20);
        let mut rng = StdRng::seed_from_u64(42);
        let start = Position::new(5, 5);
        let mut critters = [Critter::new(start, 1)];

        ai.advance(&mut critters, &grid, &mut rng);

        let critter = critters[0];
        assert!((30..90).contains(&critter.move_timer));
        let d = (critter.target - start).abs();
        assert_eq!(d.x + d.y, 1);
        // One step reaches an adjacent waypoint.
        assert_eq!(critter.position, critter.target);
    }

    #[test]
    fn test_pending_timer_keeps_waypoint() {
        let ai = CritterAi::new(&CritterConfig::default());
        let grid = GridWorld::new(30, 20);
        let mut rng = StdRng::seed_from_u64(42);
        let mut critter = Critter::new(Position::new(5, 5), 10);
        critter.target = Position::new(7, 3);
        let mut critters = [critter];

        ai.advance(&mut critters, &grid, &mut rng);
        assert_eq!(critters[0].move_timer, 9);
        assert_eq!(critters[0].position, Position::new(6, 4));
        ai.advance(&mut critters, &grid, &mut rng);
        assert_eq!(critters[0].position, Position::new(7, 3));
        ai.advance(&mut critters, &grid, &mut rng);
        assert_eq!(critters[0].position, Position::new(7, 3));
    }

    #[test]
    fn test_critters_stay_on_board() {
        let ai = CritterAi::new(&CritterConfig {
            retarget_min: 1,
            retarget_max: 2,
            ..CritterConfig::default()
        });
        let grid = GridWorld::new(3, 3);
        let mut rng = StdRng::seed_from_u64(9);
        let mut critters = [Critter::new(Position::new(0, 0), 1), Critter::new(Position::new(2, 2), 1)];
        for _ in 0..500 {
            ai.advance(&mut critters, &grid, &mut rng);
            for critter in &critters {
                assert!(grid.contains(critter.position));
            }
        }
    }
}
