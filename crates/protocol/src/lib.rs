//! Shared protocol crate for Neon Serpent.
//!
//! This crate contains everything that crosses the boundary between the
//! simulation core and its collaborators:
//! - Intents submitted by the input layer
//! - Lifecycle events and read-only snapshots consumed by presentation
//! - Player settings owned by the persistence layer

mod error;
pub mod events;
pub mod intents;
pub mod settings;
pub mod snapshot;

pub use error::ProtocolError;
pub use events::{DeathCause, GameEvent};
pub use intents::Intent;
pub use settings::{ParticleDensity, Settings, SpeedLevel, Theme};
pub use snapshot::{BiomeKind, CritterView, SessionSnapshot};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell on the board, 0-indexed from the top-left corner.
pub type Position = glam::IVec2;

/// One of the four unit headings a snake can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step for this heading. Screen coordinates: `Up` is `-y`.
    #[inline]
    pub const fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl TryFrom<IVec2> for Direction {
    type Error = ProtocolError;

    fn try_from(v: IVec2) -> Result<Self, Self::Error> {
        match (v.x, v.y) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            (x, y) => Err(ProtocolError::NotAUnitVector { x, y }),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ProtocolError::UnknownName {
                kind: "direction",
                name: s.to_string(),
            }),
        }
    }
}
