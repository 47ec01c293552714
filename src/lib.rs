//! Cryptcrawl - turn-based core of a grid dungeon crawler
//!
//! Every player input resolves into one turn: the player's move or
//! attack, a visibility refresh, and one action from every enemy.

pub mod combat;
pub mod data;
pub mod ecs;
pub mod error;
pub mod game;
pub mod items;
pub mod progression;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use data::GameConfig;
pub use ecs::components::*;
pub use error::{GameError, GameResult};
pub use game::{Direction, Game, GameState, PlayerAction, TurnOutcome};
pub use world::{GameMap, WallGrid};
