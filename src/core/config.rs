//! Game configuration.
//!
//! Scoring parameters are configuration, not hardcoded rules: the engine
//! reads them from `GameConfig` so variants can tune them at startup.

use serde::{Deserialize, Serialize};

/// Scoring parameters for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Points awarded for collecting a gold coin.
    pub points_for_gold: i64,

    /// Points awarded for collecting a silver coin.
    pub points_for_silver: i64,

    /// Points awarded the first time a goal is reached. Each time a color's
    /// goal is reached its future award drops by one, floored at zero.
    pub max_goal_points: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            points_for_gold: 2,
            points_for_silver: 1,
            max_goal_points: 5,
        }
    }
}
