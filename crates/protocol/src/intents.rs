//! Input -> simulation intents.

use crate::{Direction, Position, ProtocolError};
use serde::{Deserialize, Serialize};

/// An intent submitted by the input collaborator.
///
/// Intents are queued and applied at the start of the next tick, never mid-tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "direction", rename_all = "snake_case")]
pub enum Intent {
    /// Steer the snake. Ignored if it reverses the current heading.
    SetDirection(Direction),
    /// Activate phase dash (cooldown-gated).
    RequestDash,
    /// Flip the paused flag.
    TogglePause,
}

impl Intent {
    /// Build a steering intent from a raw unit vector (swipe/gamepad decoders
    /// produce vectors rather than named headings).
    pub fn steer(vector: Position) -> Result<Self, ProtocolError> {
        Direction::try_from(vector).map(Intent::SetDirection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_from_vector() {
        assert_eq!(
            Intent::steer(Position::new(0, -1)),
            Ok(Intent::SetDirection(Direction::Up))
        );
        assert!(Intent::steer(Position::new(2, 0)).is_err());
    }

    #[test]
    fn test_intent_json_shape() {
        let json = serde_json::to_string(&Intent::SetDirection(Direction::Left)).unwrap();
        assert_eq!(json, r#"{"type":"set_direction","direction":"left"}"#);
        let dash = serde_json::to_string(&Intent::RequestDash).unwrap();
        let back: Intent = serde_json::from_str(&dash).unwrap();
        assert_eq!(back, Intent::RequestDash);
    }
}
