//! Turn input and results
//!
//! A turn is triggered by one cardinal direction and reports what the
//! player ended up doing.

use crate::items::Item;

/// Cardinal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Grid offset; y grows downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// How the player's half of the turn resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Not playing; nothing happened at all
    Ignored,
    /// Walked into a wall or the map edge
    Bumped,
    Attacked { killed: bool },
    PickedUp { item: Item },
    Moved,
}

/// Summary of one `handle_turn` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub action: PlayerAction,
    /// Enemies that swung at the player this turn
    pub enemies_attacked: usize,
}

impl TurnOutcome {
    pub fn ignored() -> Self {
        Self {
            action: PlayerAction::Ignored,
            enemies_attacked: 0,
        }
    }

    pub fn was_ignored(&self) -> bool {
        self.action == PlayerAction::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_are_unit_cardinal() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
        assert_eq!(Direction::Up.delta(), (0, -1));
    }
}
