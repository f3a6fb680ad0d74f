//! Engine settings supplied by the host application

use serde::{Deserialize, Serialize};

/// Name given to the board created for a user who has none
pub const DEFAULT_BOARD_NAME: &str = "My Board";

/// How a moved card's new position is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionPolicy {
    /// Land at the requested index, between its new neighbours
    #[default]
    Interpolate,
    /// Always land at the top of the destination column
    Top,
}

/// Settings for the placement engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanSettings {
    pub position_policy: PositionPolicy,
    pub default_board_name: String,
}

impl Default for KanbanSettings {
    fn default() -> Self {
        Self {
            position_policy: PositionPolicy::default(),
            default_board_name: DEFAULT_BOARD_NAME.to_string(),
        }
    }
}

impl KanbanSettings {
    /// Set the position policy
    pub fn with_position_policy(mut self, policy: PositionPolicy) -> Self {
        self.position_policy = policy;
        self
    }

    /// Set the name used when auto-creating a board
    pub fn with_default_board_name(mut self, name: impl Into<String>) -> Self {
        self.default_board_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: KanbanSettings =
            serde_json::from_str(r#"{"position_policy":"top"}"#).unwrap();
        assert_eq!(settings.position_policy, PositionPolicy::Top);
        assert_eq!(settings.default_board_name, "My Board");
    }
}
