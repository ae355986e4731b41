//! Simulation configuration.

use crate::error::EngineError;
use protocol::{Direction, SpeedLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "serpent.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub snake: SnakeConfig,
    #[serde(default)]
    pub entities: EntityConfig,
    #[serde(default)]
    pub critters: CritterConfig,
    #[serde(default)]
    pub biome: BiomeConfig,
    #[serde(default)]
    pub dash: DashConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Load configuration from `serpent.toml` or write and use defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: String| Err(EngineError::InvalidConfig(msg));

        if self.grid.width < 1 || self.grid.height < 1 {
            return invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            ));
        }
        if !(0..self.grid.width).contains(&self.snake.start_x)
            || !(0..self.grid.height).contains(&self.snake.start_y)
        {
            return invalid(format!(
                "snake start ({}, {}) lies outside the {}x{} grid",
                self.snake.start_x, self.snake.start_y, self.grid.width, self.grid.height
            ));
        }
        if self.entities.placement_attempts == 0 {
            return invalid("placement_attempts must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.entities.special_food_chance) {
            return invalid(format!(
                "special_food_chance must be within [0, 1], got {}",
                self.entities.special_food_chance
            ));
        }
        if self.critters.retarget_min == 0 || self.critters.retarget_min >= self.critters.retarget_max {
            return invalid(format!(
                "critter retarget range {}..{} is empty",
                self.critters.retarget_min, self.critters.retarget_max
            ));
        }
        if self.biome.min_duration_ms <= 0 || self.biome.min_duration_ms >= self.biome.max_duration_ms {
            return invalid(format!(
                "biome duration range {}..{} is empty",
                self.biome.min_duration_ms, self.biome.max_duration_ms
            ));
        }
        // A window no longer than a tick closes before the snake moves.
        if self.dash.duration_ms <= SpeedLevel::SLOWEST_INTERVAL_MS {
            return invalid(format!(
                "dash duration_ms must exceed the slowest tick ({}ms), got {}",
                SpeedLevel::SLOWEST_INTERVAL_MS,
                self.dash.duration_ms
            ));
        }
        if self.dash.cooldown_ms < self.dash.duration_ms {
            return invalid(format!(
                "dash cooldown_ms ({}) is shorter than duration_ms ({})",
                self.dash.cooldown_ms, self.dash.duration_ms
            ));
        }
        if self.scoring.level_every == 0 {
            return invalid("level_every must be positive".to_string());
        }
        Ok(())
    }
}

/// Board dimensions in cells.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_width")]
    pub width: i32,
    #[serde(default = "default_grid_height")]
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_width(),
            height: default_grid_height(),
        }
    }
}

fn default_grid_width() -> i32 {
    30
}
fn default_grid_height() -> i32 {
    20
}

/// Initial snake placement.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SnakeConfig {
    #[serde(default = "default_snake_start")]
    pub start_x: i32,
    #[serde(default = "default_snake_start")]
    pub start_y: i32,
    #[serde(default)]
    pub start_direction: Direction,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            start_x: default_snake_start(),
            start_y: default_snake_start(),
            start_direction: Direction::Right,
        }
    }
}

fn default_snake_start() -> i32 {
    10
}

/// Obstacle, critter and special-food population.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntityConfig {
    #[serde(default = "default_max_obstacles")]
    pub max_obstacles: usize,
    #[serde(default = "default_max_critters")]
    pub max_critters: usize,
    /// Chance that a special food appears at each spawn opportunity.
    #[serde(default = "default_special_food_chance")]
    pub special_food_chance: f64,
    /// Rejection-sampling budget per placement.
    #[serde(default = "default_placement_attempts")]
    pub placement_attempts: u32,
    /// Minimum Chebyshev distance between a new obstacle and the snake head.
    #[serde(default = "default_obstacle_clearance")]
    pub obstacle_clearance: i32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            max_obstacles: default_max_obstacles(),
            max_critters: default_max_critters(),
            special_food_chance: default_special_food_chance(),
            placement_attempts: default_placement_attempts(),
            obstacle_clearance: default_obstacle_clearance(),
        }
    }
}

fn default_max_obstacles() -> usize {
    8
}
fn default_max_critters() -> usize {
    4
}
fn default_special_food_chance() -> f64 {
    0.1
}
fn default_placement_attempts() -> u32 {
    50
}
fn default_obstacle_clearance() -> i32 {
    3
}

/// Critter wandering timers, in ticks.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CritterConfig {
    /// Upper bound (exclusive) of a freshly spawned critter's first countdown.
    #[serde(default = "default_critter_initial_timer")]
    pub initial_timer_max: u32,
    #[serde(default = "default_critter_retarget_min")]
    pub retarget_min: u32,
    #[serde(default = "default_critter_retarget_max")]
    pub retarget_max: u32,
}

impl Default for CritterConfig {
    fn default() -> Self {
        Self {
            initial_timer_max: default_critter_initial_timer(),
            retarget_min: default_critter_retarget_min(),
            retarget_max: default_critter_retarget_max(),
        }
    }
}

fn default_critter_initial_timer() -> u32 {
    100
}
fn default_critter_retarget_min() -> u32 {
    30
}
fn default_critter_retarget_max() -> u32 {
    90
}

/// Biome rotation timing, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BiomeConfig {
    #[serde(default = "default_biome_initial")]
    pub initial_duration_ms: i64,
    #[serde(default = "default_biome_min")]
    pub min_duration_ms: i64,
    #[serde(default = "default_biome_max")]
    pub max_duration_ms: i64,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            initial_duration_ms: default_biome_initial(),
            min_duration_ms: default_biome_min(),
            max_duration_ms: default_biome_max(),
        }
    }
}

fn default_biome_initial() -> i64 {
    20_000
}
fn default_biome_min() -> i64 {
    15_000
}
fn default_biome_max() -> i64 {
    25_000
}

/// Phase dash timing, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashConfig {
    #[serde(default = "default_dash_cooldown")]
    pub cooldown_ms: u64,
    #[serde(default = "default_dash_duration")]
    pub duration_ms: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_dash_cooldown(),
            duration_ms: default_dash_duration(),
        }
    }
}

fn default_dash_cooldown() -> u64 {
    5_000
}
fn default_dash_duration() -> u64 {
    500
}

/// Base rewards. Food scales with level; critters and special food also
/// scale with the biome score multiplier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default = "default_food_points")]
    pub food_points: u64,
    #[serde(default = "default_critter_points")]
    pub critter_points: u64,
    #[serde(default = "default_special_food_points")]
    pub special_food_points: u64,
    /// Level goes up whenever the body length after eating food is a multiple of this.
    #[serde(default = "default_level_every")]
    pub level_every: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            food_points: default_food_points(),
            critter_points: default_critter_points(),
            special_food_points: default_special_food_points(),
            level_every: default_level_every(),
        }
    }
}

fn default_food_points() -> u64 {
    10
}
fn default_critter_points() -> u64 {
    25
}
fn default_special_food_points() -> u64 {
    50
}
fn default_level_every() -> usize {
    5
}

/// Session-level knobs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Fixed RNG seed for reproducible sessions. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Where the file store keeps high score, settings and leaderboard.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: default_save_path(),
        }
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from("serpent-save.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.grid.width, config.grid.height), (30, 20));
        assert_eq!(config.entities.placement_attempts, 50);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[grid]\nwidth = 12\n\n[dash]\ncooldown_ms = 100\n").unwrap();
        assert_eq!(config.grid.width, 12);
        assert_eq!(config.grid.height, 20);
        assert_eq!(config.dash.cooldown_ms, 100);
        assert_eq!(config.dash.duration_ms, 500);
        assert_eq!(config.snake.start_direction, Direction::Right);
    }

    #[test]
    fn test_start_outside_grid_is_rejected() {
        let mut config = Config::default();
        config.grid.width = 5;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_dash_window_must_outlast_a_tick() {
        let mut config = Config::default();
        config.dash.duration_ms = 0;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
        config.dash.duration_ms = 200;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
        config.dash.duration_ms = 201;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dash_cooldown_shorter_than_window_is_rejected() {
        let mut config = Config::default();
        config.dash.cooldown_ms = 400;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_config_survives_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
