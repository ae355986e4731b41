//! Engine error types.
//!
//! The tick itself never fails: wall hits, placement exhaustion and rejected
//! intents are ordinary state transitions. These errors cover configuration
//! and the persistence collaborator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save file could not be decoded: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("Save file could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
}
