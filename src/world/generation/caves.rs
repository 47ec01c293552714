//! Cave generator using cellular automata
//!
//! Creates organic, natural-looking cave systems.

use rand::rngs::StdRng;
use rand::Rng;

use super::{DungeonGenerator, WallGrid};
use crate::ecs::Position;

/// Random fill smoothed by the 4-5 rule, then trimmed to its largest cave
#[derive(Debug, Clone)]
pub struct CaveGenerator {
    pub fill_probability: f64,
    pub iterations: usize,
}

impl Default for CaveGenerator {
    fn default() -> Self {
        Self {
            fill_probability: 0.45,
            iterations: 5,
        }
    }
}

impl DungeonGenerator for CaveGenerator {
    fn generate(&mut self, width: i32, height: i32, rng: &mut StdRng) -> WallGrid {
        if width < 5 || height < 5 {
            return WallGrid::bordered(width, height);
        }

        let mut grid = WallGrid::new_solid(width, height);

        // Initial random fill
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                if rng.gen_bool(self.fill_probability) {
                    grid.set(x, y, false);
                }
            }
        }

        for _ in 0..self.iterations {
            let mut next = grid.clone();

            for y in 1..height - 1 {
                for x in 1..width - 1 {
                    let wall_count = count_wall_neighbors(&grid, x, y);
                    if wall_count > 4 {
                        next.set(x, y, true);
                    } else if wall_count < 4 {
                        next.set(x, y, false);
                    }
                }
            }

            grid = next;
        }

        keep_largest_region(&mut grid);

        if grid.floor_cells().is_empty() {
            log::warn!("Cave generation left no floor, falling back to an open chamber");
            return WallGrid::bordered(width, height);
        }

        grid.seal_border();
        grid
    }
}

/// Count wall neighbors (8-directional)
fn count_wall_neighbors(grid: &WallGrid, x: i32, y: i32) -> i32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if grid.is_wall(x + dx, y + dy) {
                count += 1;
            }
        }
    }
    count
}

/// Flood fill every region and wall off all but the biggest
fn keep_largest_region(grid: &mut WallGrid) {
    let width = grid.width();
    let mut region_of = vec![usize::MAX; (width * grid.height()) as usize];
    let mut regions: Vec<Vec<Position>> = Vec::new();

    for start in grid.floor_cells() {
        let start_idx = (start.y * width + start.x) as usize;
        if region_of[start_idx] != usize::MAX {
            continue;
        }

        let id = regions.len();
        let mut cells = Vec::new();
        let mut stack = vec![start];
        region_of[start_idx] = id;

        while let Some(pos) = stack.pop() {
            cells.push(pos);
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let next = pos.offset(dx, dy);
                if grid.is_wall(next.x, next.y) {
                    continue;
                }
                let idx = (next.y * width + next.x) as usize;
                if region_of[idx] == usize::MAX {
                    region_of[idx] = id;
                    stack.push(next);
                }
            }
        }

        regions.push(cells);
    }

    let largest = regions
        .iter()
        .enumerate()
        .max_by_key(|(_, cells)| cells.len())
        .map(|(id, _)| id);

    for (id, cells) in regions.iter().enumerate() {
        if Some(id) != largest {
            for pos in cells {
                grid.set(pos.x, pos.y, true);
            }
        }
    }
}
