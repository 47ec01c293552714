//! Procedural map generation
//!
//! Generators only decide where the walls are. Entity placement is the
//! level builder's job.

pub mod caves;
pub mod rooms;

pub use caves::CaveGenerator;
pub use rooms::RoomsGenerator;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Tile, TileType};
use crate::ecs::Position;

/// Boolean wall grid, row-major, `true` = wall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl WallGrid {
    /// Every cell a wall
    pub fn new_solid(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![true; (width * height) as usize],
        }
    }

    /// One open room: walls on the outer ring only
    pub fn bordered(width: i32, height: i32) -> Self {
        let mut grid = Self::new_solid(width, height);
        for y in 1..grid.height - 1 {
            for x in 1..grid.width - 1 {
                grid.set(x, y, false);
            }
        }
        grid
    }

    /// Parse a hand-drawn grid. `#` is a wall, anything else is floor;
    /// short rows are padded with wall.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let height = rows.len() as i32;
        let mut grid = Self::new_solid(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                grid.set(x as i32, y as i32, c == '#');
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Out of bounds counts as wall
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.cells[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, wall: bool) {
        if self.in_bounds(x, y) {
            self.cells[(y * self.width + x) as usize] = wall;
        }
    }

    /// Floor cells in row-major order
    pub fn floor_cells(&self) -> Vec<Position> {
        let mut floors = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_wall(x, y) {
                    floors.push(Position::new(x, y));
                }
            }
        }
        floors
    }

    /// Convert 1:1 into tiles, row-major
    pub fn to_tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let tile_type = if self.is_wall(x, y) {
                    TileType::Wall
                } else {
                    TileType::Floor
                };
                tiles.push(Tile::new(Position::new(x, y), tile_type));
            }
        }
        tiles
    }

    /// Force the outer ring to wall
    fn seal_border(&mut self) {
        for x in 0..self.width {
            self.set(x, 0, true);
            self.set(x, self.height - 1, true);
        }
        for y in 0..self.height {
            self.set(0, y, true);
            self.set(self.width - 1, y, true);
        }
    }
}

/// Produces a wall grid of the requested size
pub trait DungeonGenerator {
    fn generate(&mut self, width: i32, height: i32, rng: &mut StdRng) -> WallGrid;
}

/// Which built-in generator to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorKind {
    #[default]
    Rooms,
    Caves,
}

impl GeneratorKind {
    pub fn build(self) -> Box<dyn DungeonGenerator> {
        match self {
            GeneratorKind::Rooms => Box::new(RoomsGenerator::default()),
            GeneratorKind::Caves => Box::new(CaveGenerator::default()),
        }
    }
}
