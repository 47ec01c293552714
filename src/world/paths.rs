//! Shortest-path steps toward a shared goal
//!
//! One scan per enemy pass; every enemy then asks for its own path.

use std::collections::HashMap;

use pathfinding::prelude::dijkstra_all;

use super::GameMap;
use crate::ecs::Position;

/// Source of path steps toward a goal cell
pub trait Pathfinder {
    /// Prepare paths from every reachable cell to `goal`
    fn scan(&mut self, map: &GameMap, goal: Position);

    /// Up to `length` steps from `from` toward the last scanned goal.
    /// The first element is the next cell to step into; empty when the
    /// goal is unreachable or `from` is the goal.
    fn find_path(&mut self, from: Position, length: usize) -> Vec<Position>;
}

const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Dijkstra flood from the goal over 8-directional walkable cells, unit cost
#[derive(Debug, Clone, Default)]
pub struct DijkstraPathfinder {
    goal: Option<Position>,
    toward_goal: HashMap<Position, (Position, u32)>,
}

impl DijkstraPathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps from `from` to the goal, if reachable
    pub fn distance(&self, from: Position) -> Option<u32> {
        if Some(from) == self.goal {
            return Some(0);
        }
        self.toward_goal.get(&from).map(|&(_, cost)| cost)
    }
}

impl Pathfinder for DijkstraPathfinder {
    fn scan(&mut self, map: &GameMap, goal: Position) {
        self.goal = Some(goal);
        self.toward_goal = dijkstra_all(&goal, |&p| {
            NEIGHBOURS
                .iter()
                .map(move |&(dx, dy)| p.offset(dx, dy))
                .filter(|n| map.is_walkable(n.x, n.y))
                .map(|n| (n, 1u32))
                .collect::<Vec<_>>()
        });
    }

    fn find_path(&mut self, from: Position, length: usize) -> Vec<Position> {
        let goal = match self.goal {
            Some(goal) => goal,
            None => return Vec::new(),
        };

        let mut path = Vec::new();
        let mut current = from;
        while path.len() < length && current != goal {
            match self.toward_goal.get(&current) {
                Some(&(next, _)) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PlayerTemplate;
    use crate::progression::LevelUpRules;
    use crate::world::generation::WallGrid;

    fn map_from(rows: &[&str], player: Position) -> GameMap {
        let walls = WallGrid::from_rows(rows);
        GameMap::with_player(
            walls.width(),
            walls.height(),
            walls.to_tiles(),
            player,
            &PlayerTemplate::default(),
            LevelUpRules::default(),
        )
        .expect("valid map")
    }

    #[test]
    fn test_first_step_moves_closer() {
        let map = map_from(
            &[
                "#######",
                "#.....#",
                "#.....#",
                "#.....#",
                "#######",
            ],
            Position::new(1, 1),
        );
        let mut pathfinder = DijkstraPathfinder::new();
        pathfinder.scan(&map, Position::new(1, 1));

        let path = pathfinder.find_path(Position::new(5, 3), 1);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].chebyshev_distance(&Position::new(1, 1)), 3);
        assert_eq!(pathfinder.distance(Position::new(5, 3)), Some(4));
    }

    #[test]
    fn test_full_path_ends_at_goal() {
        let map = map_from(
            &[
                "#######",
                "#.#...#",
                "#.#.#.#",
                "#...#.#",
                "#######",
            ],
            Position::new(1, 1),
        );
        let mut pathfinder = DijkstraPathfinder::new();
        pathfinder.scan(&map, Position::new(1, 1));

        let path = pathfinder.find_path(Position::new(5, 3), 32);
        assert_eq!(path.last(), Some(&Position::new(1, 1)));
        for step in &path {
            assert!(map.is_walkable(step.x, step.y));
        }
    }

    #[test]
    fn test_unreachable_and_goal_give_empty_path() {
        let map = map_from(
            &[
                "######",
                "#.#..#",
                "######",
            ],
            Position::new(1, 1),
        );
        let mut pathfinder = DijkstraPathfinder::new();
        pathfinder.scan(&map, Position::new(1, 1));

        assert!(pathfinder.find_path(Position::new(3, 1), 1).is_empty());
        assert!(pathfinder.find_path(Position::new(1, 1), 1).is_empty());
        assert_eq!(pathfinder.distance(Position::new(4, 1)), None);
    }

    #[test]
    fn test_no_scan_means_no_path() {
        let mut pathfinder = DijkstraPathfinder::new();
        assert!(pathfinder.find_path(Position::new(2, 2), 1).is_empty());
    }
}
