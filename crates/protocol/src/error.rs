//! Protocol error types.

use thiserror::Error;

/// Errors raised while validating values that cross the collaborator boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid speed level: {0} (expected 1..=5)")]
    InvalidSpeedLevel(u8),

    #[error("Not a unit direction vector: ({x}, {y})")]
    NotAUnitVector { x: i32, y: i32 },

    #[error("Unknown {kind}: {name:?}")]
    UnknownName { kind: &'static str, name: String },
}
