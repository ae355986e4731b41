//! Persistence collaborator: high score, games played, settings, leaderboard.

use crate::error::EngineError;
use protocol::Settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How many final scores the leaderboard keeps.
pub const LEADERBOARD_SIZE: usize = 10;

/// Storage the session reads at start and writes at game over.
pub trait Store: Send + Sync {
    fn load_high_score(&self) -> Result<u64, EngineError>;

    fn save_high_score(&mut self, score: u64) -> Result<(), EngineError>;

    fn load_games_played(&self) -> Result<u64, EngineError>;

    /// Returns the new count.
    fn increment_games_played(&mut self) -> Result<u64, EngineError>;

    fn load_settings(&self) -> Result<Settings, EngineError>;

    fn save_settings(&mut self, settings: &Settings) -> Result<(), EngineError>;

    /// Top scores, highest first.
    fn load_leaderboard(&self) -> Result<Vec<u64>, EngineError>;

    /// Insert a final score and return the updated leaderboard.
    fn record_score(&mut self, score: u64) -> Result<Vec<u64>, EngineError>;
}

/// Everything that survives between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub leaderboard: Vec<u64>,
    #[serde(default)]
    pub settings: Settings,
}

impl SaveData {
    fn insert_score(&mut self, score: u64) {
        self.leaderboard.push(score);
        self.leaderboard.sort_unstable_by(|a, b| b.cmp(a));
        self.leaderboard.truncate(LEADERBOARD_SIZE);
    }
}

/// Volatile store. Used by tests and by embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub data: SaveData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: SaveData) -> Self {
        Self { data }
    }
}

impl Store for MemoryStore {
    fn load_high_score(&self) -> Result<u64, EngineError> {
        Ok(self.data.high_score)
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), EngineError> {
        self.data.high_score = score;
        Ok(())
    }

    fn load_games_played(&self) -> Result<u64, EngineError> {
        Ok(self.data.games_played)
    }

    fn increment_games_played(&mut self) -> Result<u64, EngineError> {
        self.data.games_played += 1;
        Ok(self.data.games_played)
    }

    fn load_settings(&self) -> Result<Settings, EngineError> {
        Ok(self.data.settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), EngineError> {
        self.data.settings = *settings;
        Ok(())
    }

    fn load_leaderboard(&self) -> Result<Vec<u64>, EngineError> {
        Ok(self.data.leaderboard.clone())
    }

    fn record_score(&mut self, score: u64) -> Result<Vec<u64>, EngineError> {
        self.data.insert_score(score);
        Ok(self.data.leaderboard.clone())
    }
}

/// TOML save file. Every call is a read-modify-write of the whole file; a
/// missing file reads as defaults.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SaveData, EngineError> {
        if !self.path.exists() {
            debug!("No save file at {}, using defaults", self.path.display());
            return Ok(SaveData::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn write(&self, data: &SaveData) -> Result<(), EngineError> {
        std::fs::write(&self.path, toml::to_string_pretty(data)?)?;
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut SaveData) -> T) -> Result<T, EngineError> {
        let mut data = self.read()?;
        let out = f(&mut data);
        self.write(&data)?;
        Ok(out)
    }
}

impl Store for FileStore {
    fn load_high_score(&self) -> Result<u64, EngineError> {
        Ok(self.read()?.high_score)
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), EngineError> {
        info!("New high score: {}", score);
        self.update(|data| data.high_score = score)
    }

    fn load_games_played(&self) -> Result<u64, EngineError> {
        Ok(self.read()?.games_played)
    }

    fn increment_games_played(&mut self) -> Result<u64, EngineError> {
        self.update(|data| {
            data.games_played += 1;
            data.games_played
        })
    }

    fn load_settings(&self) -> Result<Settings, EngineError> {
        Ok(self.read()?.settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), EngineError> {
        self.update(|data| data.settings = *settings)
    }

    fn load_leaderboard(&self) -> Result<Vec<u64>, EngineError> {
        Ok(self.read()?.leaderboard)
    }

    fn record_score(&mut self, score: u64) -> Result<Vec<u64>, EngineError> {
        self.update(|data| {
            data.insert_score(score);
            data.leaderboard.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::SpeedLevel;

    fn temp_save(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("serpent-{}-{}.toml", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_leaderboard_keeps_top_ten_descending() {
        let mut store = MemoryStore::new();
        for score in [30, 10, 50, 20, 40, 60, 70, 80, 90, 100, 110, 5] {
            store.record_score(score).unwrap();
        }
        let board = store.load_leaderboard().unwrap();
        assert_eq!(board, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_file_store_missing_file_reads_defaults() {
        let store = FileStore::new(temp_save("missing"));
        assert_eq!(store.load_high_score().unwrap(), 0);
        assert_eq!(store.load_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_save("persist");
        {
            let mut store = FileStore::new(&path);
            store.save_high_score(420).unwrap();
            assert_eq!(store.increment_games_played().unwrap(), 1);
            assert_eq!(store.increment_games_played().unwrap(), 2);
            store
                .save_settings(&Settings {
                    speed: SpeedLevel::new(5).unwrap(),
                    ..Settings::default()
                })
                .unwrap();
            store.record_score(420).unwrap();
        }
        let store = FileStore::new(&path);
        assert_eq!(store.load_high_score().unwrap(), 420);
        assert_eq!(store.load_games_played().unwrap(), 2);
        assert_eq!(store.load_settings().unwrap().speed.tick_interval_ms(), 50);
        assert_eq!(store.load_leaderboard().unwrap(), vec![420]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_save("corrupt");
        std::fs::write(&path, "high_score = \"lots\"").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load_high_score(), Err(EngineError::Decode(_))));
        let _ = std::fs::remove_file(&path);
    }
}
