//! Tick-by-tick session scenarios on the default 30x20 board.

use engine::entity::Critter;
use engine::scoring;
use engine::snake::Snake;
use engine::{Config, GameSession, MemoryStore, SaveData};
use protocol::{DeathCause, Direction, GameEvent, Intent, Position, Settings, SpeedLevel};
use std::time::Duration;

fn config() -> Config {
    let mut config = Config::default();
    config.session.seed = Some(7);
    config
}

/// A started session with an empty board: no obstacles, no critters, food
/// parked in the top-left corner.
fn empty_board() -> GameSession {
    empty_board_with(config())
}

fn empty_board_with(config: Config) -> GameSession {
    let mut session = GameSession::new(config, Box::new(MemoryStore::new())).unwrap();
    session.start();
    let world = &mut session.state_mut().world;
    world.clear();
    world.set_food(Position::new(0, 0));
    session
}

fn snake_of(cells: &[(i32, i32)], direction: Direction) -> Snake {
    // Cells are tail first.
    let (x, y) = cells[0];
    let mut snake = Snake::new(Position::new(x, y), direction);
    for &(x, y) in &cells[1..] {
        snake.advance(Position::new(x, y), true);
    }
    snake
}

#[test]
fn start_populates_board() {
    let mut session = GameSession::new(config(), Box::new(MemoryStore::new())).unwrap();
    session.start();
    let snapshot = session.snapshot();

    assert!(snapshot.playing);
    assert_eq!(snapshot.snake, vec![Position::new(10, 10)]);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.level, 1);
    let food = snapshot.food.expect("food placed at start");
    assert_ne!(food, Position::new(10, 10));
    assert!(snapshot.obstacles.len() <= 8);
    assert!(snapshot.critters.len() <= 4);
    for obstacle in &snapshot.obstacles {
        let d = (*obstacle - Position::new(10, 10)).abs();
        assert!(d.x.max(d.y) >= 3, "obstacle {obstacle} too close to the start");
        assert_ne!(*obstacle, food);
    }
}

#[test]
fn eating_food_scores_and_grows() {
    let mut session = empty_board();
    session.state_mut().world.set_food(Position::new(11, 10));

    let events = session.tick();

    assert!(events.contains(&GameEvent::FoodEaten {
        position: Position::new(11, 10),
        points: 10
    }));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.head(), Some(Position::new(11, 10)));
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.length(), 2);
    let food = snapshot.food.expect("food respawned");
    assert!(!snapshot.snake.contains(&food));
}

#[test]
fn fifth_segment_levels_up_and_doubles_food() {
    let mut session = empty_board();
    session.state_mut().snake = snake_of(&[(7, 10), (8, 10), (9, 10), (10, 10)], Direction::Right);
    session.state_mut().world.set_food(Position::new(11, 10));

    let events = session.tick();
    assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
    assert_eq!(session.snapshot().length(), 5);
    assert_eq!(session.snapshot().score, 10);

    session.state_mut().world.set_food(Position::new(12, 10));
    let events = session.tick();
    assert!(events.contains(&GameEvent::FoodEaten {
        position: Position::new(12, 10),
        points: 20
    }));
    assert_eq!(session.snapshot().score, 30);
    assert_eq!(session.snapshot().level, 2);
}

#[test]
fn wall_ends_session_once() {
    let mut session = empty_board();
    session.state_mut().snake = Snake::new(Position::new(29, 10), Direction::Right);
    session.state_mut().status.score = 40;

    let events = session.tick();
    let game_overs: Vec<_> = events.iter().filter(|e| e.is_game_over()).collect();
    assert_eq!(
        game_overs,
        vec![&GameEvent::GameOver {
            cause: DeathCause::Wall,
            final_score: 40,
            final_length: 1,
            final_level: 1,
        }]
    );
    assert!(!session.is_playing());
    assert_eq!(session.games_played(), 1);
    assert_eq!(session.high_score(), 40);
    assert_eq!(session.leaderboard().unwrap(), vec![40]);

    let tick = session.snapshot().tick;
    assert!(session.tick().is_empty());
    assert_eq!(session.snapshot().tick, tick);
    assert!(session.snapshot().game_over);
}

#[test]
fn obstacle_ends_session() {
    let mut session = empty_board();
    session.state_mut().world.add_obstacle(Position::new(11, 10));

    let events = session.tick();
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver {
            cause: DeathCause::Obstacle,
            ..
        })
    ));
}

#[test]
fn running_into_own_body_ends_session() {
    let mut session = empty_board();
    session.state_mut().snake = snake_of(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Direction::Right);

    let events = session.tick();
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver {
            cause: DeathCause::SelfCollision,
            final_length: 5,
            ..
        })
    ));
}

#[test]
fn dash_wraps_walls_then_cools_down() {
    let mut session = empty_board();
    session.state_mut().snake = Snake::new(Position::new(29, 10), Direction::Right);

    session.submit(Intent::RequestDash);
    let events = session.tick();
    assert!(events.contains(&GameEvent::DashActivated {
        position: Position::new(29, 10)
    }));
    assert_eq!(session.snapshot().head(), Some(Position::new(0, 10)));
    assert!(session.snapshot().dash_active);

    // 150ms ticks: the 500ms window closes on the tick reaching 600ms.
    assert!(session.tick().is_empty());
    assert!(session.tick().is_empty());
    let events = session.tick();
    assert!(events.contains(&GameEvent::DashExpired));
    assert!(!session.snapshot().dash_active);
    assert_eq!(session.state().elapsed_ms, 600);

    session.submit(Intent::RequestDash);
    let events = session.tick();
    assert!(!events.iter().any(|e| matches!(e, GameEvent::DashActivated { .. })));
    assert!(!session.snapshot().dash_active);
    assert!(session.snapshot().dash_cooldown_progress < 1.0);

    // Window closed: obstacles are deadly again.
    let head = session.snapshot().head().unwrap();
    session.state_mut().world.add_obstacle(head + Position::new(1, 0));
    let events = session.tick();
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver {
            cause: DeathCause::Obstacle,
            ..
        })
    ));
}

#[test]
fn expired_dash_no_longer_wraps() {
    let mut session = empty_board();
    session.submit(Intent::RequestDash);
    session.tick();
    while session.snapshot().dash_active {
        session.tick();
    }
    session.state_mut().snake = Snake::new(Position::new(29, 10), Direction::Right);

    let events = session.tick();
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver {
            cause: DeathCause::Wall,
            ..
        })
    ));
}

#[test]
fn eating_critter_removes_it_and_pays_bonus() {
    let mut session = empty_board();
    session
        .state_mut()
        .world
        .add_critter(Critter::new(Position::new(11, 10), 50));
    let multiplier = session.state().biome.score_multiplier();

    let events = session.tick();
    let expected = scoring::bonus_points(25, multiplier, 1);
    assert!(events.contains(&GameEvent::CritterEaten {
        position: Position::new(11, 10),
        points: expected
    }));
    let snapshot = session.snapshot();
    assert!(snapshot.critters.is_empty());
    assert_eq!(snapshot.score, expected);
    assert_eq!(snapshot.length(), 2);
}

#[test]
fn special_food_pays_bonus() {
    let mut session = empty_board();
    session.state_mut().world.set_special_food(Position::new(11, 10));
    let multiplier = session.state().biome.score_multiplier();

    let events = session.tick();
    let expected = scoring::bonus_points(50, multiplier, 1);
    assert!(events.contains(&GameEvent::SpecialFoodEaten {
        position: Position::new(11, 10),
        points: expected
    }));
    assert_eq!(session.snapshot().score, expected);
    assert_ne!(session.snapshot().special_food, Some(Position::new(11, 10)));
}

#[test]
fn eating_special_food_rolls_for_another() {
    let mut config = config();
    config.entities.special_food_chance = 1.0;
    let mut session = empty_board_with(config);
    session
        .state_mut()
        .world
        .add_critter(Critter::new(Position::new(20, 5), 50));
    session.state_mut().world.set_special_food(Position::new(11, 10));

    let events = session.tick();
    let spawned = events
        .iter()
        .find_map(|e| match e {
            GameEvent::SpecialFoodSpawned { position } => Some(*position),
            _ => None,
        })
        .expect("special food respawned");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.special_food, Some(spawned));
    assert!(!snapshot.snake.contains(&spawned));
    assert_ne!(snapshot.food, Some(spawned));
    assert!(snapshot.critters.iter().all(|c| c.position != spawned));
}

#[test]
fn special_food_without_chance_stays_gone() {
    let mut config = config();
    config.entities.special_food_chance = 0.0;
    let mut session = empty_board_with(config);
    session.state_mut().world.set_special_food(Position::new(11, 10));

    let events = session.tick();
    assert!(events.iter().any(|e| matches!(e, GameEvent::SpecialFoodEaten { .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::SpecialFoodSpawned { .. })));
    assert_eq!(session.snapshot().special_food, None);
}

#[test]
fn speed_change_waits_for_next_start() {
    let mut data = SaveData::default();
    data.settings.speed = SpeedLevel::new(5).unwrap();
    let mut session = GameSession::new(config(), Box::new(MemoryStore::with_data(data))).unwrap();
    session.start();
    let world = &mut session.state_mut().world;
    world.clear();
    world.set_food(Position::new(0, 0));

    session
        .update_settings(Settings {
            speed: SpeedLevel::new(1).unwrap(),
            ..*session.settings()
        })
        .unwrap();
    session.tick();
    session.tick();
    assert_eq!(session.state().elapsed_ms, 100);
    assert_eq!(session.tick_interval(), Duration::from_millis(50));
    let multiplier = session.state().biome.speed_multiplier();
    assert_eq!(session.snapshot().effective_interval_ms, 50.0 / multiplier);

    session.start();
    assert_eq!(session.tick_interval(), Duration::from_millis(200));
    session.tick();
    assert_eq!(session.state().elapsed_ms, 200);
}

#[test]
fn set_paused_takes_effect_immediately() {
    let mut session = empty_board();
    session.set_paused(true);
    assert!(session.snapshot().paused);
    assert!(session.tick().is_empty());
    assert_eq!(session.snapshot().tick, 0);

    session.set_paused(false);
    session.tick();
    assert_eq!(session.snapshot().tick, 1);
}

#[test]
fn reversal_is_ignored() {
    let mut session = empty_board();
    session.state_mut().snake = snake_of(&[(9, 10), (10, 10)], Direction::Right);

    session.submit(Intent::SetDirection(Direction::Left));
    session.tick();
    assert_eq!(session.snapshot().head(), Some(Position::new(11, 10)));
    assert_eq!(session.snapshot().direction, Direction::Right);

    // Checked against the travelled heading, so Up then Left keeps Up.
    session.submit(Intent::SetDirection(Direction::Up));
    session.submit(Intent::SetDirection(Direction::Left));
    session.tick();
    assert_eq!(session.snapshot().head(), Some(Position::new(11, 9)));
    assert_eq!(session.snapshot().direction, Direction::Up);
}

#[test]
fn pause_freezes_simulation() {
    let mut session = empty_board();
    session.submit(Intent::TogglePause);
    assert!(session.tick().is_empty());

    session.submit(Intent::RequestDash);
    for _ in 0..5 {
        session.tick();
    }
    let snapshot = session.snapshot();
    assert!(snapshot.paused);
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.head(), Some(Position::new(10, 10)));
    assert!(!snapshot.dash_active);

    session.submit(Intent::TogglePause);
    session.tick();
    assert!(!session.snapshot().paused);
    assert_eq!(session.snapshot().head(), Some(Position::new(11, 10)));
}

#[test]
fn biome_rotates_after_initial_duration() {
    let mut config = config();
    config.biome.initial_duration_ms = 300;
    let mut session = GameSession::new(config, Box::new(MemoryStore::new())).unwrap();
    session.start();
    let world = &mut session.state_mut().world;
    world.clear();
    world.set_food(Position::new(0, 0));
    let first = session.snapshot().biome;

    assert!(session.tick().is_empty());
    let events = session.tick();
    assert!(events.contains(&GameEvent::BiomeChanged { biome: first.next() }));
    let remaining = session.snapshot().biome_remaining_ms;
    assert!((15_000..25_000).contains(&remaining));
}

#[test]
fn restart_resets_progress_but_keeps_records() {
    let mut session = empty_board();
    session.state_mut().snake = Snake::new(Position::new(29, 10), Direction::Right);
    session.state_mut().status.score = 70;
    session.tick();
    assert!(!session.is_playing());

    session.start();
    let snapshot = session.snapshot();
    assert!(snapshot.playing);
    assert!(!snapshot.game_over);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.high_score, 70);
    assert_eq!(snapshot.games_played, 1);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = config();
    config.grid.width = 0;
    assert!(GameSession::new(config, Box::new(MemoryStore::new())).is_err());
}
