//! Room and corridor dungeon generator
//!
//! Classic roguelike dungeon with rectangular rooms connected by corridors.

use rand::rngs::StdRng;
use rand::Rng;

use super::{DungeonGenerator, WallGrid};
use crate::ecs::Position;

/// A rectangular room
#[derive(Debug, Clone)]
struct Room {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Room {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Rooms joined in placement order by L-shaped corridors
#[derive(Debug, Clone)]
pub struct RoomsGenerator {
    pub min_room_size: i32,
    pub max_room_size: i32,
    pub max_rooms: usize,
    pub attempts: usize,
}

impl Default for RoomsGenerator {
    fn default() -> Self {
        Self {
            min_room_size: 4,
            max_room_size: 8,
            max_rooms: 18,
            attempts: 100,
        }
    }
}

impl DungeonGenerator for RoomsGenerator {
    fn generate(&mut self, width: i32, height: i32, rng: &mut StdRng) -> WallGrid {
        // Too small for even one room: a single open chamber
        if width < self.min_room_size + 3 || height < self.min_room_size + 3 {
            return WallGrid::bordered(width, height);
        }

        let mut grid = WallGrid::new_solid(width, height);
        let max_w = self.max_room_size.min(width - 3).max(self.min_room_size);
        let max_h = self.max_room_size.min(height - 3).max(self.min_room_size);

        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..self.attempts {
            if rooms.len() >= self.max_rooms {
                break;
            }

            let w = rng.gen_range(self.min_room_size..=max_w);
            let h = rng.gen_range(self.min_room_size..=max_h);
            let x = rng.gen_range(1..width - w - 1);
            let y = rng.gen_range(1..height - h - 1);

            let new_room = Room::new(x, y, w, h);

            if rooms.iter().any(|r| new_room.intersects(r)) {
                continue;
            }

            carve_room(&mut grid, &new_room);

            if let Some(prev) = rooms.last() {
                let prev_center = prev.center();
                let new_center = new_room.center();

                if rng.gen_bool(0.5) {
                    carve_h_corridor(&mut grid, prev_center.x, new_center.x, prev_center.y);
                    carve_v_corridor(&mut grid, prev_center.y, new_center.y, new_center.x);
                } else {
                    carve_v_corridor(&mut grid, prev_center.y, new_center.y, prev_center.x);
                    carve_h_corridor(&mut grid, prev_center.x, new_center.x, new_center.y);
                }
            }

            rooms.push(new_room);
        }

        log::debug!("Carved {} rooms into {}x{} map", rooms.len(), width, height);

        grid.seal_border();
        grid
    }
}

/// Carve out a room
fn carve_room(grid: &mut WallGrid, room: &Room) {
    for y in room.y1 + 1..room.y2 {
        for x in room.x1 + 1..room.x2 {
            grid.set(x, y, false);
        }
    }
}

fn carve_h_corridor(grid: &mut WallGrid, x1: i32, x2: i32, y: i32) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    for x in start..=end {
        grid.set(x, y, false);
    }
}

fn carve_v_corridor(grid: &mut WallGrid, y1: i32, y2: i32, x: i32) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    for y in start..=end {
        grid.set(x, y, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn reachable_from(grid: &WallGrid, start: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            if grid.is_wall(pos.x, pos.y) || !seen.insert(pos) {
                continue;
            }
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                stack.push(pos.offset(dx, dy));
            }
        }
        seen
    }

    #[test]
    fn test_rooms_are_connected() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = RoomsGenerator::default().generate(60, 40, &mut rng);
        let floors = grid.floor_cells();
        assert!(!floors.is_empty());

        let reachable = reachable_from(&grid, floors[0]);
        assert_eq!(reachable.len(), floors.len());
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = RoomsGenerator::default().generate(50, 50, &mut StdRng::seed_from_u64(9));
        let b = RoomsGenerator::default().generate(50, 50, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
