//! Character templates for data-driven spawning
//!
//! Loaded as part of the game config and used by the level builder.

use serde::{Deserialize, Serialize};

/// Starting stats for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTemplate {
    pub health: i32,
    pub attack_power: i32,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            health: 100,
            attack_power: 10,
        }
    }
}

/// A template for creating enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTemplate {
    /// Display name
    pub name: String,
    pub health: i32,
    pub attack_power: i32,
    /// XP reward for killing
    pub experience_value: u32,
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            name: "Goblin".to_string(),
            health: 30,
            attack_power: 5,
            experience_value: 10,
        }
    }
}
