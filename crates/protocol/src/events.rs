//! Simulation -> presentation lifecycle events.
//!
//! Each event carries just enough data for the rendering/audio/UI layer to
//! trigger a cosmetic reaction (particles at a position, a "+points" flash,
//! a biome banner). The core never depends on how they are presented.

use crate::{BiomeKind, Position};
use serde::{Deserialize, Serialize};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Head left the board while dash was inactive.
    Wall,
    /// Head entered an obstacle cell while dash was inactive.
    Obstacle,
    /// Head entered one of the snake's own segments while dash was inactive.
    SelfCollision,
}

/// A lifecycle event produced by a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    FoodEaten { position: Position, points: u64 },
    SpecialFoodEaten { position: Position, points: u64 },
    SpecialFoodSpawned { position: Position },
    CritterEaten { position: Position, points: u64 },
    LevelUp { level: u32 },
    DashActivated { position: Position },
    DashExpired,
    BiomeChanged { biome: BiomeKind },
    GameOver {
        cause: DeathCause,
        final_score: u64,
        final_length: usize,
        final_level: u32,
    },
}

impl GameEvent {
    /// Points awarded by this event, if it is a consumption event.
    pub fn points(&self) -> Option<u64> {
        match self {
            GameEvent::FoodEaten { points, .. }
            | GameEvent::SpecialFoodEaten { points, .. }
            | GameEvent::CritterEaten { points, .. } => Some(*points),
            _ => None,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}
