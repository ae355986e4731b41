//! Serpent - headless Neon Serpent runner.
//!
//! Plays one session on the autopilot, logs lifecycle events and prints the
//! final snapshot as JSON. An optional first argument sets and saves the
//! speed level (1-5).

mod autopilot;

use engine::{Config, FileStore, GameSession, SessionHandle};
use protocol::{GameEvent, Settings, SpeedLevel};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,engine=debug")),
        )
        .init();

    info!("Neon Serpent v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Loaded configuration");
    info!("  Grid: {}x{}", config.grid.width, config.grid.height);
    info!(
        "  Entities: {} obstacles, {} critters",
        config.entities.max_obstacles, config.entities.max_critters
    );
    info!("  Save file: {}", config.session.save_path.display());

    let store = FileStore::new(config.session.save_path.clone());
    let mut session = GameSession::new(config, Box::new(store))?;
    if let Some(arg) = std::env::args().nth(1) {
        let speed = SpeedLevel::new(arg.parse()?)?;
        session.update_settings(Settings {
            speed,
            ..*session.settings()
        })?;
    }
    info!(
        "High score {} over {} games, speed {}",
        session.high_score(),
        session.games_played(),
        session.settings().speed.get()
    );

    let (handle, opening) = SessionHandle::launch(session);
    for event in &opening {
        log_event(event);
    }

    let mut updates = handle.subscribe();
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => {
                    for event in &update.events {
                        log_event(event);
                    }
                    if update.snapshot.game_over {
                        break;
                    }
                    for intent in autopilot::plan(&update.snapshot) {
                        handle.submit(intent).await;
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!("Runner lagged, skipped {} updates", missed),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping session");
                break;
            }
        }
    }

    let leaderboard = handle.session().read().await.leaderboard()?;
    let snapshot = handle.shutdown().await;
    info!("Leaderboard: {:?}", leaderboard);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameOver {
            cause,
            final_score,
            final_length,
            final_level,
        } => info!(
            "Game over: {:?}, score {}, length {}, level {}",
            cause, final_score, final_length, final_level
        ),
        GameEvent::LevelUp { level } => info!("Level {}", level),
        GameEvent::BiomeChanged { biome } => info!("Entering the {} biome", biome),
        other => debug!("{:?}", other),
    }
}
