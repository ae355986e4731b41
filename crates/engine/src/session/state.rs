//! The simulation aggregate.

use crate::biome::BiomeScheduler;
use crate::config::Config;
use crate::dash::PhaseDashController;
use crate::snake::Snake;
use crate::world::{GridWorld, World};
use protocol::{DeathCause, Position, SpeedLevel};

/// Per-session score and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub score: u64,
    /// Starts at 1, never decreases within a session.
    pub level: u32,
    pub playing: bool,
    pub paused: bool,
    /// Set once, when the session ends.
    pub game_over: Option<DeathCause>,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            playing: false,
            paused: false,
            game_over: None,
        }
    }
}

/// All mutable simulation state, owned by the session and lent to each
/// component for the duration of its step.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub snake: Snake,
    pub world: World,
    pub biome: BiomeScheduler,
    pub dash: PhaseDashController,
    pub status: Status,
    /// Ticks run this session.
    pub tick: u64,
    /// Simulated milliseconds since session start.
    pub elapsed_ms: u64,
    /// Simulated milliseconds per tick, fixed for the whole session.
    pub tick_interval_ms: u64,
}

impl SimulationState {
    pub fn new(config: &Config) -> Self {
        let grid = GridWorld::new(config.grid.width, config.grid.height);
        Self {
            snake: Self::fresh_snake(config),
            world: World::new(grid),
            biome: BiomeScheduler::new(&config.biome),
            dash: PhaseDashController::new(&config.dash),
            status: Status::default(),
            tick: 0,
            elapsed_ms: 0,
            tick_interval_ms: SpeedLevel::default().tick_interval_ms(),
        }
    }

    fn fresh_snake(config: &Config) -> Snake {
        Snake::new(
            Position::new(config.snake.start_x, config.snake.start_y),
            config.snake.start_direction,
        )
    }

    /// Back to a blank board with a one-segment snake, ticking every
    /// `tick_interval_ms`.
    pub fn reset(&mut self, config: &Config, tick_interval_ms: u64) {
        self.snake = Self::fresh_snake(config);
        self.world.clear();
        self.biome.reset();
        self.dash.reset();
        self.status = Status::default();
        self.tick = 0;
        self.elapsed_ms = 0;
        self.tick_interval_ms = tick_interval_ms;
    }
}
