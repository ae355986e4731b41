//! Neon Serpent simulation core.

pub mod ai;
pub mod biome;
pub mod collision;
pub mod config;
pub mod dash;
pub mod entity;
pub mod error;
pub mod persistence;
pub mod placement;
pub mod scoring;
pub mod session;
pub mod snake;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use error::EngineError;
pub use persistence::{FileStore, MemoryStore, SaveData, Store};
pub use session::{
    ClockHandle, ClockState, GameSession, SessionHandle, SimulationClock, SimulationState, Status,
    TickBroadcast,
};
