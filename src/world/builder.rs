//! Level builder
//!
//! Turns a wall grid into a populated map: player, enemies and items
//! each get their own floor cell.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::generation::WallGrid;
use super::GameMap;
use crate::data::{EnemyTemplate, GameConfig, PlayerTemplate};
use crate::error::{GameError, GameResult};
use crate::items::Item;
use crate::progression::LevelUpRules;

/// Stateless placement rules for one kind of level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelBuilder {
    pub player: PlayerTemplate,
    pub enemy: EnemyTemplate,
    pub potion_healing: i32,
    pub rules: LevelUpRules,
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl LevelBuilder {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            player: config.player.clone(),
            enemy: config.enemy.clone(),
            potion_healing: config.potion_healing,
            rules: config.progression,
        }
    }

    /// Populate `walls` with the player, `enemy_count` enemies and
    /// `item_count` potions, all on distinct floor cells.
    ///
    /// Floor cells are shuffled, then handed out in order: player first,
    /// then enemies, then items.
    pub fn build(
        &self,
        width: i32,
        height: i32,
        enemy_count: usize,
        item_count: usize,
        walls: &WallGrid,
        rng: &mut StdRng,
    ) -> GameResult<GameMap> {
        if walls.width() != width || walls.height() != height {
            return Err(GameError::GridMismatch {
                width,
                height,
                actual_width: walls.width(),
                actual_height: walls.height(),
            });
        }

        let mut floors = walls.floor_cells();
        let required = enemy_count + item_count + 1;
        if floors.len() < required {
            return Err(GameError::InsufficientSpace {
                required,
                available: floors.len(),
            });
        }

        floors.shuffle(rng);
        let (&player_pos, rest) = floors.split_first().ok_or(GameError::InsufficientSpace {
            required,
            available: 0,
        })?;

        let mut map = GameMap::with_player(
            width,
            height,
            walls.to_tiles(),
            player_pos,
            &self.player,
            self.rules,
        )?;

        let (enemy_cells, item_cells) = rest.split_at(enemy_count);
        for &pos in enemy_cells {
            map.spawn_enemy(pos, &self.enemy);
        }
        for &pos in item_cells.iter().take(item_count) {
            map.spawn_item(pos, Item::potion(self.potion_healing));
        }

        log::info!(
            "Built {}x{} level: {} enemies, {} items, player at ({}, {})",
            width,
            height,
            enemy_count,
            item_count,
            player_pos.x,
            player_pos.y
        );

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_places_everything_on_distinct_floor() {
        let walls = WallGrid::bordered(12, 10);
        let mut rng = StdRng::seed_from_u64(11);
        let map = LevelBuilder::default()
            .build(12, 10, 15, 8, &walls, &mut rng)
            .expect("room for everyone");

        assert_eq!(map.enemies().len(), 15);
        assert_eq!(map.items().len(), 8);

        let mut seen = HashSet::new();
        let player = map.player_position().expect("player placed");
        seen.insert(player);
        for entity in map.enemies().iter().chain(map.items()) {
            let pos = map.position_of(*entity).expect("placed");
            assert!(map.is_walkable(pos.x, pos.y));
            assert!(seen.insert(pos), "two entities share {:?}", pos);
        }
    }

    #[test]
    fn test_exact_fit_succeeds() {
        // 3 floor cells
        let walls = WallGrid::from_rows(&["#####", "#...#", "#####"]);
        let mut rng = StdRng::seed_from_u64(2);
        let map = LevelBuilder::default().build(5, 3, 1, 1, &walls, &mut rng);
        assert!(map.is_ok());
    }

    #[test]
    fn test_insufficient_space() {
        let walls = WallGrid::from_rows(&["#####", "#...#", "#####"]);
        let mut rng = StdRng::seed_from_u64(2);
        let err = LevelBuilder::default().build(5, 3, 2, 1, &walls, &mut rng);
        assert!(matches!(
            err,
            Err(GameError::InsufficientSpace { required: 4, available: 3 })
        ));
    }

    #[test]
    fn test_grid_size_must_match() {
        let walls = WallGrid::bordered(8, 8);
        let mut rng = StdRng::seed_from_u64(2);
        let err = LevelBuilder::default().build(10, 8, 0, 0, &walls, &mut rng);
        assert!(matches!(err, Err(GameError::GridMismatch { .. })));
    }

    #[test]
    fn test_templates_applied() {
        let walls = WallGrid::bordered(6, 6);
        let mut rng = StdRng::seed_from_u64(5);
        let builder = LevelBuilder::default();
        let map = builder.build(6, 6, 1, 1, &walls, &mut rng).expect("fits");

        let health = map.player_health().expect("player health");
        assert_eq!(health.max(), 100);
        assert_eq!(map.player_attack_power(), Some(10));

        let enemy = map.enemy_views()[0];
        assert_eq!(enemy.health.current(), 30);
        assert_eq!(enemy.attack_power, 5);
        assert_eq!(map.item_views()[0].1, Item::potion(25));
    }
}
