//! Game session and the per-tick update.

use crate::ai::CritterAi;
use crate::collision::{self, Consumed, Resolution};
use crate::config::Config;
use crate::error::EngineError;
use crate::persistence::Store;
use crate::placement::EntityPlacer;
use crate::scoring;
use protocol::{DeathCause, GameEvent, Intent, Position, SessionSnapshot, Settings};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

use super::state::SimulationState;

/// One play session plus the collaborators it talks to.
///
/// `tick` knows nothing about scheduling; [`super::SimulationClock`] (or a
/// test) decides when it runs.
pub struct GameSession {
    config: Config,
    state: SimulationState,
    placer: EntityPlacer,
    critter_ai: CritterAi,
    rng: StdRng,
    store: Box<dyn Store>,
    settings: Settings,
    high_score: u64,
    games_played: u64,
    /// Intents waiting for the next tick, in submission order.
    intents: VecDeque<Intent>,
}

impl GameSession {
    /// Create an idle session. Call [`GameSession::start`] to begin play.
    pub fn new(config: Config, store: Box<dyn Store>) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let settings = store.load_settings()?;
        let high_score = store.load_high_score()?;
        let games_played = store.load_games_played()?;
        let mut state = SimulationState::new(&config);
        state.tick_interval_ms = settings.speed.tick_interval_ms();

        Ok(Self {
            state,
            placer: EntityPlacer::new(&config.entities),
            critter_ai: CritterAi::new(&config.critters),
            config,
            rng,
            store,
            settings,
            high_score,
            games_played,
            intents: VecDeque::with_capacity(8),
        })
    }

    /// Reset the board and populate it: food, obstacles, critters, then
    /// maybe a special food.
    pub fn start(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.state.reset(&self.config, self.settings.speed.tick_interval_ms());
        self.intents.clear();
        self.state.status.playing = true;

        let state = &mut self.state;
        let entities = &self.config.entities;
        self.placer.respawn_food(&state.snake, &mut state.world, &mut self.rng);
        self.placer
            .spawn_obstacles(entities.max_obstacles, &state.snake, &mut state.world, &mut self.rng);
        self.placer.spawn_critters(
            entities.max_critters,
            &self.config.critters,
            &state.snake,
            &mut state.world,
            &mut self.rng,
        );
        if let Some(position) = self
            .placer
            .maybe_spawn_special_food(&state.snake, &mut state.world, &mut self.rng)
        {
            events.push(GameEvent::SpecialFoodSpawned { position });
        }

        info!(
            "Session started on {}x{}: {} obstacles, {} critters, special food: {}",
            state.world.grid.width(),
            state.world.grid.height(),
            state.world.obstacles().len(),
            state.world.critters().len(),
            state.world.special_food().is_some()
        );
        events
    }

    /// Queue an intent for the start of the next tick.
    pub fn submit(&mut self, intent: Intent) {
        if !self.state.status.playing {
            trace!("Dropping {:?}: no session in progress", intent);
            return;
        }
        self.intents.push_back(intent);
    }

    /// Run one tick and return the events it produced.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.state.status.playing {
            return events;
        }

        self.apply_intents(&mut events);
        if self.state.status.paused {
            return events;
        }

        let interval = self.state.tick_interval_ms;
        self.state.tick += 1;
        self.state.elapsed_ms += interval;
        let now = self.state.elapsed_ms;

        if let Some(biome) = self.state.biome.advance(interval, &mut self.rng) {
            events.push(GameEvent::BiomeChanged { biome });
        }
        if self.state.dash.advance(now) {
            events.push(GameEvent::DashExpired);
        }
        {
            let world = &mut self.state.world;
            let grid = world.grid;
            self.critter_ai.advance(world.critters_mut(), &grid, &mut self.rng);
        }
        if self.state.world.food().is_none() {
            let state = &mut self.state;
            self.placer.respawn_food(&state.snake, &mut state.world, &mut self.rng);
        }

        let proposed = self.state.snake.next_head();
        let phasing = self.state.dash.is_active();
        match collision::resolve(proposed, phasing, &self.state.snake, &self.state.world) {
            Resolution::Terminal(cause) => self.finish(cause, &mut events),
            Resolution::Moved { head, consumed } => {
                self.state.snake.advance(head, consumed.is_some());
                if let Some(consumed) = consumed {
                    self.consume(head, consumed, &mut events);
                }
            }
        }

        trace!(
            "Tick #{}: head={} score={} events={}",
            self.state.tick,
            self.state.snake.head(),
            self.state.status.score,
            events.len()
        );
        if self.state.tick % 100 == 0 {
            debug!(
                "Tick #{}: t={}ms score={} level={} length={} biome={} critters={}",
                self.state.tick,
                now,
                self.state.status.score,
                self.state.status.level,
                self.state.snake.len(),
                self.state.biome.current(),
                self.state.world.critters().len()
            );
        }
        events
    }

    fn apply_intents(&mut self, events: &mut Vec<GameEvent>) {
        while let Some(intent) = self.intents.pop_front() {
            match intent {
                Intent::SetDirection(direction) => {
                    if !self.state.snake.steer(direction) {
                        trace!("Ignored reversal to {:?}", direction);
                    }
                }
                Intent::RequestDash => {
                    if self.state.status.paused {
                        continue;
                    }
                    if self.state.dash.try_activate(self.state.elapsed_ms) {
                        events.push(GameEvent::DashActivated {
                            position: self.state.snake.head(),
                        });
                    }
                }
                Intent::TogglePause => {
                    self.state.status.paused = !self.state.status.paused;
                    debug!("Paused: {}", self.state.status.paused);
                }
            }
        }
    }

    fn consume(&mut self, head: Position, consumed: Consumed, events: &mut Vec<GameEvent>) {
        let rules = &self.config.scoring;
        let state = &mut self.state;
        let level = state.status.level;
        let multiplier = state.biome.score_multiplier();

        match consumed {
            Consumed::Food => {
                let points = scoring::food_points(rules.food_points, level);
                state.status.score += points;
                events.push(GameEvent::FoodEaten { position: head, points });
                debug!("Food eaten at {}: +{}", head, points);

                if scoring::earns_level(state.snake.len(), rules.level_every) {
                    state.status.level += 1;
                    events.push(GameEvent::LevelUp {
                        level: state.status.level,
                    });
                    debug!("Level up: {}", state.status.level);
                }
                self.placer.respawn_food(&state.snake, &mut state.world, &mut self.rng);
            }
            Consumed::SpecialFood => {
                let points = scoring::bonus_points(rules.special_food_points, multiplier, level);
                state.status.score += points;
                state.world.take_special_food();
                events.push(GameEvent::SpecialFoodEaten { position: head, points });
                debug!("Special food eaten at {}: +{}", head, points);

                if let Some(position) =
                    self.placer
                        .maybe_spawn_special_food(&state.snake, &mut state.world, &mut self.rng)
                {
                    events.push(GameEvent::SpecialFoodSpawned { position });
                }
            }
            Consumed::Critter(index) => {
                let points = scoring::bonus_points(rules.critter_points, multiplier, level);
                state.status.score += points;
                state.world.remove_critter(index);
                events.push(GameEvent::CritterEaten { position: head, points });
                debug!(
                    "Critter eaten at {}: +{} ({} left)",
                    head,
                    points,
                    state.world.critters().len()
                );
            }
        }
    }

    /// Terminal collision: capture final stats, persist them, stop playing.
    fn finish(&mut self, cause: DeathCause, events: &mut Vec<GameEvent>) {
        let status = &mut self.state.status;
        status.playing = false;
        status.game_over = Some(cause);
        let final_score = status.score;
        let final_level = status.level;
        let final_length = self.state.snake.len();

        match self.store.increment_games_played() {
            Ok(count) => self.games_played = count,
            Err(e) => {
                warn!("Failed to record games played: {}", e);
                self.games_played += 1;
            }
        }
        if final_score > self.high_score {
            self.high_score = final_score;
            if let Err(e) = self.store.save_high_score(final_score) {
                warn!("Failed to save high score: {}", e);
            }
        }
        if let Err(e) = self.store.record_score(final_score) {
            warn!("Failed to update leaderboard: {}", e);
        }

        info!(
            "Game over ({:?}) after {} ticks: score={} length={} level={}",
            cause, self.state.tick, final_score, final_length, final_level
        );
        events.push(GameEvent::GameOver {
            cause,
            final_score,
            final_length,
            final_level,
        });
    }

    /// Read-only view for collaborators. Only meaningful between ticks.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = &self.state;
        let world = &state.world;
        let base_interval = state.tick_interval_ms as f64;
        SessionSnapshot {
            tick: state.tick,
            grid_width: world.grid.width(),
            grid_height: world.grid.height(),
            snake: state.snake.body().iter().copied().collect(),
            direction: state.snake.direction(),
            food: world.food().map(|f| f.position),
            special_food: world.special_food().map(|f| f.position),
            obstacles: world.obstacles().iter().map(|o| o.position).collect(),
            critters: world.critters().iter().map(|c| c.view()).collect(),
            biome: state.biome.current(),
            biome_remaining_ms: state.biome.remaining_ms(),
            effective_interval_ms: base_interval / state.biome.speed_multiplier(),
            dash_active: state.dash.is_active(),
            dash_cooldown_progress: state.dash.cooldown_progress(state.elapsed_ms),
            score: state.status.score,
            level: state.status.level,
            high_score: self.high_score,
            games_played: self.games_played,
            playing: state.status.playing,
            paused: state.status.paused,
            game_over: state.status.game_over.is_some(),
        }
    }

    /// Pause or resume immediately, without waiting for the next tick.
    pub fn set_paused(&mut self, paused: bool) {
        if self.state.status.playing && self.state.status.paused != paused {
            self.state.status.paused = paused;
            debug!("Paused: {}", paused);
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.status.playing
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for scenario setup and tooling. Not for use mid-tick.
    #[inline]
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Persist new settings. A new speed takes effect from the next
    /// [`GameSession::start`].
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), EngineError> {
        self.store.save_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Wall-clock interval between ticks for the current session.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.tick_interval_ms)
    }

    #[inline]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    #[inline]
    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn leaderboard(&self) -> Result<Vec<u64>, EngineError> {
        self.store.load_leaderboard()
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("high_score", &self.high_score)
            .field("games_played", &self.games_played)
            .field("pending_intents", &self.intents.len())
            .finish_non_exhaustive()
    }
}
