//! Game state machine
//!
//! Owns the current session and resolves one player turn at a time.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::messages::{MessageCategory, MessageLog};
use super::turn::{Direction, PlayerAction, TurnOutcome};
use crate::data::GameConfig;
use crate::ecs::{run_enemy_ai, AiAction, Name};
use crate::error::GameResult;
use crate::progression::level_title;
use crate::world::{
    DijkstraPathfinder, DungeonGenerator, GameMap, LevelBuilder, Pathfinder, Shadowcaster,
    VisibilityField, VisibilityProvider, WallGrid,
};

/// All possible game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Player died; terminal until a new game starts
    GameOver,
    /// Terminal until a new game starts
    Victory,
}

/// The main game struct that holds all session data
pub struct Game {
    config: GameConfig,
    state: GameState,
    /// Current dungeon map, `None` before the first game
    map: Option<GameMap>,
    visibility: Option<VisibilityField>,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    generator: Box<dyn DungeonGenerator>,
    pathfinder: Box<dyn Pathfinder>,
    fov: Box<dyn VisibilityProvider>,
    messages: MessageLog,
    /// Turns resolved this session
    turn: u32,
}

impl Game {
    /// Create an engine with the built-in generator, pathfinder and FOV
    pub fn new(config: GameConfig) -> Self {
        let generator = config.generator.build();
        Self::with_providers(
            config,
            generator,
            Box::new(DijkstraPathfinder::new()),
            Box::new(Shadowcaster),
        )
    }

    /// Create an engine with custom strategy implementations
    pub fn with_providers(
        config: GameConfig,
        generator: Box<dyn DungeonGenerator>,
        pathfinder: Box<dyn Pathfinder>,
        fov: Box<dyn VisibilityProvider>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            state: GameState::GameOver,
            map: None,
            visibility: None,
            rng,
            generator,
            pathfinder,
            fov,
            messages: MessageLog::new(),
            turn: 0,
        }
    }

    // ------------------------------------------------------------------
    // Session setup
    // ------------------------------------------------------------------

    /// Generate and populate a fresh level, replacing any current session.
    ///
    /// On error the previous session is left untouched.
    pub fn start_new_game(
        &mut self,
        width: i32,
        height: i32,
        enemy_count: usize,
        item_count: usize,
    ) -> GameResult<()> {
        self.config.validate()?;
        let walls = self.generator.generate(width, height, &mut self.rng);
        self.start_with_walls(&walls, enemy_count, item_count)
    }

    /// Start a game sized by the loaded config
    pub fn start_configured_game(&mut self) -> GameResult<()> {
        let (w, h) = (self.config.map_width, self.config.map_height);
        let (enemies, items) = (self.config.enemy_count, self.config.item_count);
        self.start_new_game(w, h, enemies, items)
    }

    /// Populate a supplied wall grid and start playing on it
    pub fn start_with_walls(
        &mut self,
        walls: &WallGrid,
        enemy_count: usize,
        item_count: usize,
    ) -> GameResult<()> {
        self.config.validate()?;
        let builder = LevelBuilder::from_config(&self.config);
        let map = builder.build(
            walls.width(),
            walls.height(),
            enemy_count,
            item_count,
            walls,
            &mut self.rng,
        )?;
        self.start_with_map(map);
        Ok(())
    }

    /// Adopt an already populated map as the new session
    pub fn start_with_map(&mut self, map: GameMap) {
        let mut visibility = VisibilityField::from_map(&map);
        if let Some(origin) = map.player_position() {
            visibility.recompute(self.fov.as_mut(), origin, self.config.vision_radius);
        }

        self.map = Some(map);
        self.turn = 0;
        self.messages.clear();

        if let Some(map) = self.map.as_mut() {
            reveal(map, &visibility);
            log::info!(
                "New game: {}x{}, {} enemies, {} items",
                map.width(),
                map.height(),
                map.enemies().len(),
                map.items().len()
            );
        }
        self.visibility = Some(visibility);

        self.messages
            .push("You descend into the crypt...", MessageCategory::System, 0);
        self.set_state(GameState::Playing);
    }

    // ------------------------------------------------------------------
    // Turns
    // ------------------------------------------------------------------

    /// Resolve one player input and the enemy replies.
    ///
    /// Ignored unless playing. Enemies act even when the player bumps
    /// into a wall.
    pub fn handle_turn(&mut self, direction: Direction) -> TurnOutcome {
        if self.state != GameState::Playing {
            return TurnOutcome::ignored();
        }
        let map = match self.map.as_mut() {
            Some(map) => map,
            None => return TurnOutcome::ignored(),
        };
        let from = match map.player_position() {
            Some(pos) => pos,
            None => return TurnOutcome::ignored(),
        };

        self.turn += 1;
        let turn = self.turn;
        let player = map.player();
        let (dx, dy) = direction.delta();
        let target = from.offset(dx, dy);

        let action = if !map.is_walkable(target.x, target.y) {
            PlayerAction::Bumped
        } else if let Some(enemy) = map.live_enemy_at(target) {
            let name = name_of(map.world(), enemy);
            let result = map.attack(player, enemy);
            self.messages.push(
                format!("You hit the {} for {}.", name, result.damage),
                MessageCategory::Combat,
                turn,
            );
            if result.killed {
                map.remove_enemy(enemy);
                self.messages.push(
                    format!("The {} dies. (+{} XP)", name, result.experience_gained),
                    MessageCategory::Combat,
                    turn,
                );
            }
            if result.levels_gained > 0 {
                if let Some(exp) = map.player_experience() {
                    self.messages.push(
                        format!("You reach level {}: {}.", exp.level, level_title(exp.level)),
                        MessageCategory::Progression,
                        turn,
                    );
                }
            }
            PlayerAction::Attacked {
                killed: result.killed,
            }
        } else if let Some(item_entity) = map.item_at(target) {
            let picked = map.pick_up(item_entity);
            map.set_position(player, target);
            match picked {
                Some(item) => {
                    self.messages.push(
                        format!("You pick up a {}.", item.name()),
                        MessageCategory::Item,
                        turn,
                    );
                    PlayerAction::PickedUp { item }
                }
                None => PlayerAction::Moved,
            }
        } else {
            map.set_position(player, target);
            PlayerAction::Moved
        };

        log::debug!("Turn {}: {:?} -> {:?}", turn, direction, action);

        // Visibility only changes with the player's cell
        let now = map.player_position();
        if now != Some(from) && map.is_player_alive() {
            if let (Some(origin), Some(visibility)) = (now, self.visibility.as_mut()) {
                visibility.recompute(self.fov.as_mut(), origin, self.config.vision_radius);
                reveal(map, visibility);
            }
        }

        let ai_turns = run_enemy_ai(
            map,
            self.pathfinder.as_mut(),
            self.config.aggro_radius,
            &mut self.rng,
        );

        let mut enemies_attacked = 0;
        for ai_turn in &ai_turns {
            if let AiAction::Attack { damage, .. } = ai_turn.action {
                enemies_attacked += 1;
                let name = name_of(map.world(), ai_turn.enemy);
                self.messages.push(
                    format!("The {} hits you for {}.", name, damage),
                    MessageCategory::Combat,
                    turn,
                );
            }
        }

        let player_dead = !map.is_player_alive();
        if player_dead {
            self.messages
                .push("You die...", MessageCategory::System, turn);
            log::info!("Player died on turn {}", turn);
            self.set_state(GameState::GameOver);
        }

        TurnOutcome {
            action,
            enemies_attacked,
        }
    }

    /// End the session as won. Only meaningful while playing.
    pub fn declare_victory(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.messages
            .push("Victory!", MessageCategory::System, self.turn);
        self.set_state(GameState::Victory);
        true
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::debug!("State {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Get the current map
    pub fn map(&self) -> Option<&GameMap> {
        self.map.as_ref()
    }

    /// Get the current map mutably
    pub fn map_mut(&mut self) -> Option<&mut GameMap> {
        self.map.as_mut()
    }

    /// Light grid for the current session
    pub fn visibility(&self) -> Option<&VisibilityField> {
        self.visibility.as_ref()
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.messages
    }

    /// Turns resolved this session
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Mark every lit tile as discovered
fn reveal(map: &mut GameMap, visibility: &VisibilityField) {
    for pos in visibility.visible_positions() {
        map.discover(pos.x, pos.y);
    }
}

fn name_of(world: &World, entity: Entity) -> String {
    world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| "enemy".to_string())
}
