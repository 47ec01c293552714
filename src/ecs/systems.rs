//! ECS Systems
//!
//! Enemy decision-making: attack when adjacent, chase when close,
//! otherwise wander.

use hecs::Entity;
use rand::Rng;

use crate::ecs::{Name, Position};
use crate::world::{GameMap, Pathfinder};

/// Manhattan distance at which enemies notice the player
pub const AGGRO_RADIUS: i32 = 8;

/// What an enemy did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Attack { damage: i32, killed: bool },
    Chase { from: Position, to: Position },
    Wander { from: Position, to: Position },
    Wait,
}

/// One enemy's resolved turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTurn {
    pub enemy: Entity,
    pub action: AiAction,
}

/// Run AI for all enemies.
///
/// The pathfinder is scanned once toward the player's current cell and
/// shared by every enemy. Enemies act in placement order against the
/// positions of those that already moved. Dead enemies are swept after.
pub fn run_enemy_ai<R: Rng>(
    map: &mut GameMap,
    pathfinder: &mut dyn Pathfinder,
    aggro_radius: i32,
    rng: &mut R,
) -> Vec<AiTurn> {
    let mut turns = Vec::new();

    if let Some(goal) = map.player_position() {
        pathfinder.scan(map, goal);

        // Snapshot so removals cannot disturb the walk
        let enemies: Vec<Entity> = map.enemies().to_vec();
        for enemy in enemies {
            if !map.is_alive(enemy) {
                continue;
            }
            let action = decide_and_act(map, enemy, pathfinder, aggro_radius, rng);
            log::debug!("{} {:?}", enemy_name(map, enemy), action);
            turns.push(AiTurn { enemy, action });
        }
    }

    map.sweep_dead_enemies();
    turns
}

/// Decide and carry out one enemy's turn
pub fn decide_and_act<R: Rng>(
    map: &mut GameMap,
    enemy: Entity,
    pathfinder: &mut dyn Pathfinder,
    aggro_radius: i32,
    rng: &mut R,
) -> AiAction {
    if !map.is_alive(enemy) {
        return AiAction::Wait;
    }
    let (from, player_pos) = match (map.position_of(enemy), map.player_position()) {
        (Some(from), Some(player_pos)) => (from, player_pos),
        _ => return AiAction::Wait,
    };

    let distance = from.distance(&player_pos);

    // Engage; a corpse is not attacked again
    if distance <= 1 {
        if !map.is_player_alive() {
            return AiAction::Wait;
        }
        let player = map.player();
        let result = map.attack(enemy, player);
        return AiAction::Attack {
            damage: result.damage,
            killed: result.killed,
        };
    }

    // Pursue
    if distance <= aggro_radius {
        let step = pathfinder.find_path(from, 1).first().copied();
        if let Some(to) = step {
            if is_valid_move(map, enemy, to) {
                map.set_position(enemy, to);
                return AiAction::Chase { from, to };
            }
        }
    }

    // Wander
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    if dx == 0 && dy == 0 {
        return AiAction::Wait;
    }
    let to = from.offset(dx, dy);
    if is_valid_move(map, enemy, to) {
        map.set_position(enemy, to);
        AiAction::Wander { from, to }
    } else {
        AiAction::Wait
    }
}

/// Check if a position is valid for an enemy to move to.
///
/// In bounds, walkable, not the player's cell, and not held by another
/// live enemy.
pub fn is_valid_move(map: &GameMap, mover: Entity, pos: Position) -> bool {
    if !map.in_bounds(pos.x, pos.y) || !map.is_walkable(pos.x, pos.y) {
        return false;
    }
    if map.player_position() == Some(pos) {
        return false;
    }
    match map.live_enemy_at(pos) {
        Some(other) => other == mover,
        None => true,
    }
}

fn enemy_name(map: &GameMap, enemy: Entity) -> String {
    map.world()
        .get::<&Name>(enemy)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| "Enemy".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EnemyTemplate, PlayerTemplate};
    use crate::progression::LevelUpRules;
    use crate::world::generation::WallGrid;
    use crate::world::DijkstraPathfinder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Counts queries and always points one cell east
    #[derive(Default)]
    struct CountingPathfinder {
        scans: usize,
        queries: usize,
    }

    impl Pathfinder for CountingPathfinder {
        fn scan(&mut self, _map: &GameMap, _goal: Position) {
            self.scans += 1;
        }

        fn find_path(&mut self, from: Position, _length: usize) -> Vec<Position> {
            self.queries += 1;
            vec![from.offset(1, 0)]
        }
    }

    fn room(width: i32, height: i32, player: Position) -> GameMap {
        let walls = WallGrid::bordered(width, height);
        GameMap::with_player(
            width,
            height,
            walls.to_tiles(),
            player,
            &PlayerTemplate::default(),
            LevelUpRules::default(),
        )
        .expect("valid room")
    }

    #[test]
    fn test_adjacent_enemy_attacks_and_stays() {
        let mut map = room(10, 10, Position::new(5, 5));
        let enemy = map.spawn_enemy(Position::new(5, 6), &EnemyTemplate::default());
        let mut pathfinder = CountingPathfinder::default();
        let mut rng = StdRng::seed_from_u64(0);

        let action = decide_and_act(&mut map, enemy, &mut pathfinder, AGGRO_RADIUS, &mut rng);

        assert_eq!(action, AiAction::Attack { damage: 5, killed: false });
        assert_eq!(map.position_of(enemy), Some(Position::new(5, 6)));
        assert_eq!(map.player_health().map(|h| h.current()), Some(95));
        assert_eq!(pathfinder.queries, 0);
    }

    #[test]
    fn test_enemies_stop_swinging_once_player_falls() {
        let frail = PlayerTemplate {
            health: 5,
            attack_power: 1,
        };
        let mut map = GameMap::with_player(
            10,
            10,
            WallGrid::bordered(10, 10).to_tiles(),
            Position::new(5, 5),
            &frail,
            LevelUpRules::default(),
        )
        .expect("valid room");
        for pos in [Position::new(5, 6), Position::new(5, 4), Position::new(4, 5)] {
            map.spawn_enemy(pos, &EnemyTemplate::default());
        }
        let mut pathfinder = CountingPathfinder::default();
        let mut rng = StdRng::seed_from_u64(2);

        let turns = run_enemy_ai(&mut map, &mut pathfinder, AGGRO_RADIUS, &mut rng);

        let actions: Vec<AiAction> = turns.iter().map(|t| t.action).collect();
        assert_eq!(
            actions,
            vec![
                AiAction::Attack { damage: 5, killed: true },
                AiAction::Wait,
                AiAction::Wait,
            ]
        );
        assert!(!map.is_player_alive());
    }

    #[test]
    fn test_diagonal_neighbour_does_not_attack() {
        // Manhattan distance 2
        let mut map = room(10, 10, Position::new(5, 5));
        let enemy = map.spawn_enemy(Position::new(6, 6), &EnemyTemplate::default());
        let mut pathfinder = DijkstraPathfinder::new();
        let mut rng = StdRng::seed_from_u64(0);

        let turns = run_enemy_ai(&mut map, &mut pathfinder, AGGRO_RADIUS, &mut rng);

        assert!(!matches!(turns[0].action, AiAction::Attack { .. }));
        assert_eq!(map.player_health().map(|h| h.current()), Some(100));
        assert_ne!(map.position_of(enemy), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_far_enemy_never_asks_for_a_path() {
        let mut map = room(30, 30, Position::new(2, 2));
        map.spawn_enemy(Position::new(20, 20), &EnemyTemplate::default());
        let mut pathfinder = CountingPathfinder::default();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..10 {
            run_enemy_ai(&mut map, &mut pathfinder, AGGRO_RADIUS, &mut rng);
        }

        assert_eq!(pathfinder.queries, 0);
        assert_eq!(pathfinder.scans, 10);
    }

    #[test]
    fn test_chasing_enemy_closes_in() {
        let mut map = room(20, 5, Position::new(2, 2));
        let enemy = map.spawn_enemy(Position::new(8, 2), &EnemyTemplate::default());
        let mut pathfinder = DijkstraPathfinder::new();
        let mut rng = StdRng::seed_from_u64(1);

        let turns = run_enemy_ai(&mut map, &mut pathfinder, AGGRO_RADIUS, &mut rng);

        assert!(matches!(turns[0].action, AiAction::Chase { .. }));
        let pos = map.position_of(enemy).expect("enemy present");
        assert_eq!(pos.x, 7);
    }

    #[test]
    fn test_blocked_chase_falls_back_to_wander() {
        let mut map = room(10, 10, Position::new(2, 2));
        let enemy = map.spawn_enemy(Position::new(5, 5), &EnemyTemplate::default());
        // The counting pathfinder always suggests east; park a blocker there
        map.spawn_enemy(Position::new(6, 5), &EnemyTemplate::default());
        let mut pathfinder = CountingPathfinder::default();
        let mut rng = StdRng::seed_from_u64(9);

        let action = decide_and_act(&mut map, enemy, &mut pathfinder, AGGRO_RADIUS, &mut rng);

        assert_eq!(pathfinder.queries, 1);
        assert!(!matches!(action, AiAction::Chase { .. }));
        assert_ne!(map.position_of(enemy), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_enemies_never_stack() {
        let mut map = room(6, 6, Position::new(1, 1));
        for x in 2..5 {
            for y in 2..5 {
                map.spawn_enemy(Position::new(x, y), &EnemyTemplate::default());
            }
        }
        let mut pathfinder = DijkstraPathfinder::new();
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..20 {
            run_enemy_ai(&mut map, &mut pathfinder, AGGRO_RADIUS, &mut rng);
            let player = map.player_position();
            let mut cells: Vec<Position> = map
                .enemy_views()
                .iter()
                .filter(|e| e.health.is_alive())
                .map(|e| e.position)
                .collect();
            assert!(cells.iter().all(|&c| Some(c) != player));
            let before = cells.len();
            cells.sort_by_key(|p| (p.x, p.y));
            cells.dedup();
            assert_eq!(cells.len(), before);
        }
    }

    #[test]
    fn test_dead_enemies_swept_after_pass() {
        let mut map = room(10, 10, Position::new(5, 5));
        let enemy = map.spawn_enemy(Position::new(1, 1), &EnemyTemplate::default());
        if let Ok(mut health) = map.world_mut().get::<&mut crate::ecs::Health>(enemy) {
            crate::combat::apply_damage(&mut health, 100);
        }
        let mut pathfinder = DijkstraPathfinder::new();
        let mut rng = StdRng::seed_from_u64(0);

        let turns = run_enemy_ai(&mut map, &mut pathfinder, AGGRO_RADIUS, &mut rng);

        assert!(turns.is_empty());
        assert!(map.enemies().is_empty());
    }
}
