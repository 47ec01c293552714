//! Data loading and external game content
//!
//! Session tuning lives in a RON file so it can be changed without a
//! rebuild.

pub mod loader;
pub mod templates;

pub use loader::{export_default_config, load_config, try_load_config, GameConfig, DEFAULT_CONFIG_PATH};
pub use templates::{EnemyTemplate, PlayerTemplate};
