//! RON config loader
//!
//! Loads the game config from an external RON file, with fallback to
//! hardcoded defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::templates::{EnemyTemplate, PlayerTemplate};
use crate::error::{GameError, GameResult};
use crate::progression::LevelUpRules;
use crate::world::generation::GeneratorKind;

/// Default location of the config file
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.ron";

/// Everything tunable about a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub enemy_count: usize,
    pub item_count: usize,
    /// FOV radius around the player
    pub vision_radius: i32,
    /// Manhattan distance at which enemies start chasing
    pub aggro_radius: i32,
    pub player: PlayerTemplate,
    pub enemy: EnemyTemplate,
    pub potion_healing: i32,
    pub progression: LevelUpRules,
    pub generator: GeneratorKind,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 50,
            map_height: 50,
            enemy_count: 20,
            item_count: 10,
            vision_radius: 8,
            aggro_radius: crate::ecs::systems::AGGRO_RADIUS,
            player: PlayerTemplate::default(),
            enemy: EnemyTemplate::default(),
            potion_healing: 25,
            progression: LevelUpRules::default(),
            generator: GeneratorKind::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reject values no session can start with
    pub fn validate(&self) -> GameResult<()> {
        let checks = [
            (self.map_width > 0, "map_width must be positive"),
            (self.map_height > 0, "map_height must be positive"),
            (self.vision_radius >= 0, "vision_radius must not be negative"),
            (self.aggro_radius >= 0, "aggro_radius must not be negative"),
            (self.player.health > 0, "player.health must be positive"),
            (self.player.attack_power >= 0, "player.attack_power must not be negative"),
            (self.enemy.health > 0, "enemy.health must be positive"),
            (self.enemy.attack_power >= 0, "enemy.attack_power must not be negative"),
            (self.potion_healing >= 0, "potion_healing must not be negative"),
            (
                self.progression.threshold_growth.is_finite() && self.progression.threshold_growth > 0.0,
                "progression.threshold_growth must be positive",
            ),
        ];
        match checks.iter().find(|(ok, _)| !*ok) {
            Some((_, reason)) => Err(GameError::Config(reason.to_string())),
            None => Ok(()),
        }
    }
}

/// Read, parse and validate a config file
pub fn try_load_config(path: &Path) -> GameResult<GameConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| GameError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    let config: GameConfig = ron::from_str(&content)
        .map_err(|e| GameError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
    config
        .validate()
        .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Load the config, falling back to defaults.
///
/// A missing file is not worth mentioning; a broken one is logged.
pub fn load_config(path: &Path) -> GameConfig {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return GameConfig::default();
    }
    match try_load_config(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            GameConfig::default()
        }
    }
}

/// Write the default config as pretty RON
pub fn export_default_config(path: &Path) -> GameResult<()> {
    let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
    let content = ron::ser::to_string_pretty(&GameConfig::default(), pretty)
        .map_err(|e| GameError::Config(format!("failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| GameError::Config(format!("failed to create {}: {}", parent.display(), e)))?;
        }
    }
    fs::write(path, content)
        .map_err(|e| GameError::Config(format!("failed to write {}: {}", path.display(), e)))
}
