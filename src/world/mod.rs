//! World module
//!
//! Contains map data structures, tiles, visibility, pathfinding and
//! procedural generation.

pub mod builder;
pub mod fov;
pub mod generation;
pub mod map;
pub mod paths;
pub mod tile;

pub use builder::LevelBuilder;
pub use fov::{compute_fov, Shadowcaster, VisibilityField, VisibilityProvider};
pub use generation::{DungeonGenerator, GeneratorKind, WallGrid};
pub use map::{EnemyView, GameMap};
pub use paths::{DijkstraPathfinder, Pathfinder};
pub use tile::{Tile, TileType};
