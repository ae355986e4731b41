//! Read-only session snapshots.

use crate::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rotating environmental modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeKind {
    #[default]
    Fire,
    Ice,
    Magnetic,
}

impl BiomeKind {
    /// Rotation order.
    pub const CYCLE: [BiomeKind; 3] = [BiomeKind::Fire, BiomeKind::Ice, BiomeKind::Magnetic];

    pub fn name(self) -> &'static str {
        match self {
            BiomeKind::Fire => "fire",
            BiomeKind::Ice => "ice",
            BiomeKind::Magnetic => "magnetic",
        }
    }

    /// The biome that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            BiomeKind::Fire => BiomeKind::Ice,
            BiomeKind::Ice => BiomeKind::Magnetic,
            BiomeKind::Magnetic => BiomeKind::Fire,
        }
    }

    /// Multiplier applied to game speed (informational).
    pub fn speed_multiplier(self) -> f64 {
        match self {
            BiomeKind::Fire => 1.2,
            BiomeKind::Ice => 0.8,
            BiomeKind::Magnetic => 1.0,
        }
    }

    /// Multiplier applied to critter and special-food rewards.
    pub fn score_multiplier(self) -> f64 {
        match self {
            BiomeKind::Fire => 1.5,
            BiomeKind::Ice => 1.0,
            BiomeKind::Magnetic => 1.3,
        }
    }
}

impl fmt::Display for BiomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Critter position and current waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CritterView {
    pub position: Position,
    pub target: Position,
}

/// Everything a collaborator may read between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tick: u64,
    pub grid_width: i32,
    pub grid_height: i32,
    /// Head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Option<Position>,
    pub special_food: Option<Position>,
    pub obstacles: Vec<Position>,
    pub critters: Vec<CritterView>,
    pub biome: BiomeKind,
    pub biome_remaining_ms: i64,
    /// Base tick interval scaled by the biome speed multiplier.
    pub effective_interval_ms: f64,
    pub dash_active: bool,
    /// 0.0 right after activation, 1.0 once dash is ready again.
    pub dash_cooldown_progress: f64,
    pub score: u64,
    pub level: u32,
    pub high_score: u64,
    pub games_played: u64,
    pub playing: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl SessionSnapshot {
    #[inline]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.snake.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biome_cycle_order() {
        for (i, biome) in BiomeKind::CYCLE.iter().enumerate() {
            assert_eq!(biome.next(), BiomeKind::CYCLE[(i + 1) % BiomeKind::CYCLE.len()]);
        }
    }

    #[test]
    fn test_biome_multipliers() {
        assert_eq!(BiomeKind::Fire.score_multiplier(), 1.5);
        assert_eq!(BiomeKind::Ice.speed_multiplier(), 0.8);
        assert_eq!(BiomeKind::Magnetic.to_string(), "magnetic");
    }
}
