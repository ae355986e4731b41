//! Player settings owned by the persistence collaborator.

use crate::ProtocolError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Tick intervals for speed levels 1..=5, slowest first.
const TICK_INTERVALS_MS: [u64; 5] = [200, 150, 100, 75, 50];

/// Discrete game speed, 1 (slowest) to 5 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    /// Longest tick interval any speed level uses.
    pub const SLOWEST_INTERVAL_MS: u64 = TICK_INTERVALS_MS[0];

    pub fn new(level: u8) -> Result<Self, ProtocolError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ProtocolError::InvalidSpeedLevel(level))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Milliseconds between ticks at this speed.
    #[inline]
    pub fn tick_interval_ms(self) -> u64 {
        TICK_INTERVALS_MS[(self.0 - Self::MIN) as usize]
    }

    #[inline]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms())
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for SpeedLevel {
    type Error = ProtocolError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<SpeedLevel> for u8 {
    fn from(level: SpeedLevel) -> Self {
        level.0
    }
}

/// Visual theme. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Neon,
    Retro,
    Minimal,
}

/// Particle effect density. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleDensity {
    Off,
    Low,
    Medium,
    #[default]
    High,
}

impl FromStr for Theme {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "neon" => Ok(Theme::Neon),
            "retro" => Ok(Theme::Retro),
            "minimal" => Ok(Theme::Minimal),
            _ => Err(ProtocolError::UnknownName {
                kind: "theme",
                name: s.to_string(),
            }),
        }
    }
}

impl FromStr for ParticleDensity {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(ParticleDensity::Off),
            "low" => Ok(ParticleDensity::Low),
            "medium" => Ok(ParticleDensity::Medium),
            "high" => Ok(ParticleDensity::High),
            _ => Err(ProtocolError::UnknownName {
                kind: "particle density",
                name: s.to_string(),
            }),
        }
    }
}

/// Persisted player settings. Only `speed` affects the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub speed: SpeedLevel,
    #[serde(default = "default_sound")]
    pub sound: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub particles: ParticleDensity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: SpeedLevel::default(),
            sound: default_sound(),
            theme: Theme::default(),
            particles: ParticleDensity::default(),
        }
    }
}

fn default_sound() -> bool {
    true
}
