//! Entity Component System module
//!
//! Defines all components and systems for the game.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{decide_and_act, is_valid_move, run_enemy_ai, AiAction, AiTurn, AGGRO_RADIUS};
