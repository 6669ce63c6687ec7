//! Tunable world parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits and timings applied by the world when executing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Smallest accepted room width or height.
    pub min_room_dimension: u32,
    /// Largest accepted room width or height.
    pub max_room_dimension: u32,
    /// Milliseconds an avatar spends crossing one cell.
    pub move_delay_ms: u64,
    /// Milliseconds an emote stays active.
    pub action_duration_ms: u64,
}

impl WorldConfig {
    /// Clamps a requested room dimension into the accepted range.
    #[must_use]
    pub fn clamp_dimension(&self, requested: u32) -> u32 {
        let min = self.min_room_dimension.max(1);
        requested.clamp(min, self.max_room_dimension.max(min))
    }

    /// Time an avatar spends crossing one cell.
    #[must_use]
    pub const fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Time an emote stays active.
    #[must_use]
    pub const fn action_duration(&self) -> Duration {
        Duration::from_millis(self.action_duration_ms)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min_room_dimension: 4,
            max_room_dimension: 50,
            move_delay_ms: 400,
            action_duration_ms: 3_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_clamp_into_default_range() {
        let config = WorldConfig::default();
        assert_eq!(config.clamp_dimension(0), 4);
        assert_eq!(config.clamp_dimension(20), 20);
        assert_eq!(config.clamp_dimension(80), 50);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let config = WorldConfig {
            min_room_dimension: 10,
            max_room_dimension: 5,
            ..WorldConfig::default()
        };
        assert_eq!(config.clamp_dimension(7), 10);
    }

    #[test]
    fn partial_documents_fall_back_to_defaults() {
        let config: WorldConfig =
            serde_json::from_str(r#"{ "max_room_dimension": 30 }"#).expect("parse config");
        assert_eq!(config.max_room_dimension, 30);
        assert_eq!(config.min_room_dimension, 4);
        assert_eq!(config.move_delay(), Duration::from_millis(400));
    }
}
