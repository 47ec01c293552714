//! Tile definitions
//!
//! Static terrain of a single grid cell plus fog-of-war memory.

use serde::{Deserialize, Serialize};

use crate::ecs::Position;

/// A single tile in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    position: Position,
    pub tile_type: TileType,
    discovered: bool,
}

impl Tile {
    pub fn new(position: Position, tile_type: TileType) -> Self {
        Self {
            position,
            tile_type,
            discovered: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_walkable(&self) -> bool {
        self.tile_type.is_walkable()
    }

    pub fn is_transparent(&self) -> bool {
        self.tile_type.is_transparent()
    }

    /// Has the player ever seen this tile
    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// One-way: tiles never become undiscovered
    pub fn discover(&mut self) {
        self.discovered = true;
    }

    pub fn glyph(&self) -> char {
        self.tile_type.glyph()
    }
}

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    pub fn is_transparent(&self) -> bool {
        !matches!(self, TileType::Wall)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => '#',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileType::Floor => (80, 80, 80),
            TileType::Wall => (130, 110, 90),
        }
    }
}
