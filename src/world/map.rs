//! Map data structure
//!
//! The fixed-size tile grid plus every entity placed on it.

use hecs::{Entity, World};

use super::tile::Tile;
use crate::combat::{self, AttackResult};
use crate::data::{EnemyTemplate, PlayerTemplate};
use crate::ecs::{AttackPower, Enemy, Experience, Health, Name, Player, Position};
use crate::error::{GameError, GameResult};
use crate::items::{Inventory, Item};
use crate::progression::LevelUpRules;

/// A dungeon level: tiles, the player, enemies and ground items.
///
/// Entities live in an ECS world owned by the map. The enemy and item
/// lists keep placement order so every pass over them is deterministic.
pub struct GameMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    world: World,
    player: Entity,
    enemies: Vec<Entity>,
    items: Vec<Entity>,
    rules: LevelUpRules,
}

/// Read-only snapshot of one enemy, for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyView {
    pub entity: Entity,
    pub position: Position,
    pub health: Health,
    pub attack_power: i32,
}

impl GameMap {
    /// Create a map from row-major tiles and spawn the player on it.
    ///
    /// Fails if the tiles do not cover `width * height`, the player
    /// would stand on a wall or off the grid, or the template has no
    /// health.
    pub fn with_player(
        width: i32,
        height: i32,
        tiles: Vec<Tile>,
        player_pos: Position,
        template: &PlayerTemplate,
        rules: LevelUpRules,
    ) -> GameResult<Self> {
        let expected = (width.max(0) * height.max(0)) as usize;
        if tiles.len() != expected {
            return Err(GameError::TileCount {
                expected,
                actual: tiles.len(),
            });
        }
        if template.health <= 0 {
            return Err(GameError::Config(format!(
                "player health must be positive, got {}",
                template.health
            )));
        }

        let mut world = World::new();
        let player = world.spawn((
            Player,
            Name::new("Player"),
            player_pos,
            Health::new(template.health),
            AttackPower(template.attack_power),
            Experience::new(rules.first_threshold),
            Inventory::new(),
        ));

        let map = Self {
            width,
            height,
            tiles,
            world,
            player,
            enemies: Vec::new(),
            items: Vec::new(),
            rules,
        };
        if !map.is_walkable(player_pos.x, player_pos.y) {
            return Err(GameError::BlockedStart {
                x: player_pos.x,
                y: player_pos.y,
            });
        }
        Ok(map)
    }

    /// Place an enemy; appended to the end of the turn order
    pub fn spawn_enemy(&mut self, pos: Position, template: &EnemyTemplate) -> Entity {
        debug_assert!(self.in_bounds(pos.x, pos.y));
        let entity = self.world.spawn((
            Enemy { experience_value: template.experience_value },
            Name::new(template.name.clone()),
            pos,
            Health::new(template.health),
            AttackPower(template.attack_power),
        ));
        self.enemies.push(entity);
        entity
    }

    /// Place an item on the ground
    pub fn spawn_item(&mut self, pos: Position, item: Item) -> Entity {
        debug_assert!(self.in_bounds(pos.x, pos.y));
        let entity = self.world.spawn((pos, item));
        self.items.push(entity);
        entity
    }

    // ------------------------------------------------------------------
    // Grid
    // ------------------------------------------------------------------

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Check if a position is walkable (false out of bounds)
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.is_walkable())
    }

    /// Mark a tile as discovered
    pub fn discover(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx].discover();
        }
    }

    /// Light resistance per cell: 1.0 for walls, 0.0 for floor
    pub fn resistance_grid(&self) -> Vec<f64> {
        self.tiles
            .iter()
            .map(|tile| if tile.is_transparent() { 0.0 } else { 1.0 })
            .collect()
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Get the ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Enemies in turn order, including any not yet swept after dying
    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    /// Ground items in placement order
    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn position_of(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn health_of(&self, entity: Entity) -> Option<Health> {
        self.world.get::<&Health>(entity).ok().map(|h| *h)
    }

    pub fn attack_power_of(&self, entity: Entity) -> Option<i32> {
        self.world.get::<&AttackPower>(entity).ok().map(|a| a.0)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        combat::is_alive(&self.world, Some(entity))
    }

    /// Move an entity. Positions must stay on the grid.
    pub fn set_position(&mut self, entity: Entity, pos: Position) -> bool {
        debug_assert!(self.in_bounds(pos.x, pos.y), "entity moved out of bounds to {:?}", pos);
        if !self.in_bounds(pos.x, pos.y) {
            return false;
        }
        match self.world.get::<&mut Position>(entity) {
            Ok(mut p) => {
                *p = pos;
                true
            }
            Err(_) => false,
        }
    }

    pub fn player_position(&self) -> Option<Position> {
        self.position_of(self.player)
    }

    pub fn player_health(&self) -> Option<Health> {
        self.health_of(self.player)
    }

    pub fn player_attack_power(&self) -> Option<i32> {
        self.attack_power_of(self.player)
    }

    pub fn player_experience(&self) -> Option<Experience> {
        self.world.get::<&Experience>(self.player).ok().map(|x| *x)
    }

    /// Copy of the player's inventory
    pub fn player_inventory(&self) -> Option<Inventory> {
        self.world.get::<&Inventory>(self.player).ok().map(|inv| (*inv).clone())
    }

    pub fn is_player_alive(&self) -> bool {
        self.is_alive(self.player)
    }

    /// Live enemy standing on `pos`
    pub fn live_enemy_at(&self, pos: Position) -> Option<Entity> {
        self.enemies
            .iter()
            .copied()
            .find(|&e| self.is_alive(e) && self.position_of(e) == Some(pos))
    }

    /// Item lying on `pos`
    pub fn item_at(&self, pos: Position) -> Option<Entity> {
        self.items
            .iter()
            .copied()
            .find(|&e| self.position_of(e) == Some(pos))
    }

    /// Snapshot of all enemies still on the map
    pub fn enemy_views(&self) -> Vec<EnemyView> {
        self.enemies
            .iter()
            .filter_map(|&entity| {
                Some(EnemyView {
                    entity,
                    position: self.position_of(entity)?,
                    health: self.health_of(entity)?,
                    attack_power: self.attack_power_of(entity)?,
                })
            })
            .collect()
    }

    /// Snapshot of all ground items
    pub fn item_views(&self) -> Vec<(Position, Item)> {
        self.items
            .iter()
            .filter_map(|&entity| {
                let pos = self.position_of(entity)?;
                let item = self.world.get::<&Item>(entity).ok().map(|i| (*i).clone())?;
                Some((pos, item))
            })
            .collect()
    }

    /// Resolve an attack using this map's level-up rules
    pub fn attack(&mut self, attacker: Entity, target: Entity) -> AttackResult {
        combat::attack(&mut self.world, attacker, target, &self.rules)
    }

    /// Take an enemy off the map
    pub fn remove_enemy(&mut self, enemy: Entity) {
        self.enemies.retain(|&e| e != enemy);
        let _ = self.world.despawn(enemy);
    }

    /// Remove every enemy that is no longer alive; returns what was removed
    pub fn sweep_dead_enemies(&mut self) -> Vec<Entity> {
        let dead: Vec<Entity> = self
            .enemies
            .iter()
            .copied()
            .filter(|&e| !self.is_alive(e))
            .collect();
        for &enemy in &dead {
            self.remove_enemy(enemy);
        }
        dead
    }

    /// Move a ground item into the player's inventory
    pub fn pick_up(&mut self, item_entity: Entity) -> Option<Item> {
        if !self.items.contains(&item_entity) {
            return None;
        }
        let item = self
            .world
            .get::<&Item>(item_entity)
            .ok()
            .map(|i| (*i).clone())?;

        self.items.retain(|&e| e != item_entity);
        let _ = self.world.despawn(item_entity);

        if let Ok(mut inventory) = self.world.get::<&mut Inventory>(self.player) {
            item.clone().on_pickup(&mut inventory);
        }
        Some(item)
    }
}
