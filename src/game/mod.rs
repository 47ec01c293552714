//! Game module - Core game logic and state management

mod messages;
mod state;
mod turn;

pub use messages::{GameMessage, MessageCategory, MessageLog, MAX_MESSAGES};
pub use state::{Game, GameState};
pub use turn::{Direction, PlayerAction, TurnOutcome};
