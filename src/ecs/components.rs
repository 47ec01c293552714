//! ECS Components
//!
//! All components attached to entities living on a `GameMap`.

// ============================================================================
// Position
// ============================================================================

/// Position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position
    pub fn distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Position shifted by a delta
    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

// ============================================================================
// Identity & Naming
// ============================================================================

/// Name component for entities
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marks an entity as the player
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Marks an entity as an enemy
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    /// XP granted to the player on death
    pub experience_value: u32,
}

// ============================================================================
// Combat Stats
// ============================================================================

/// Health pool.
///
/// Always `0 <= current <= max`. Only the combat and progression modules
/// write to it; everything else reads through the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub(crate) current: i32,
    pub(crate) max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        debug_assert!(max > 0, "max health must be positive");
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32
    }
}

/// Flat damage dealt per attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPower(pub i32);

/// Experience and level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next: u32,
}

impl Experience {
    /// Level 1 with no XP and the given first threshold
    pub fn new(first_threshold: u32) -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next: first_threshold.max(1),
        }
    }

    /// Fraction of the way to the next level
    pub fn progress(&self) -> f32 {
        self.current_xp as f32 / self.xp_to_next as f32
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Position::new(2, 3);
        let b = Position::new(5, 1);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(a.chebyshev_distance(&b), 3);
        assert_eq!(a.offset(-1, 1), Position::new(1, 4));
    }

    #[test]
    fn test_new_health_is_full() {
        let health = Health::new(30);
        assert_eq!(health.current(), 30);
        assert_eq!(health.max(), 30);
        assert!(health.is_alive());
    }

    #[test]
    fn test_health_only_changes_through_combat() {
        let mut health = Health::new(20);
        crate::combat::apply_damage(&mut health, 25);
        crate::combat::heal(&mut health, 50);
        assert_eq!(health.current(), health.max());
    }

    #[test]
    fn test_experience_starts_at_level_one() {
        let exp = Experience::new(100);
        assert_eq!(exp.level, 1);
        assert_eq!(exp.current_xp, 0);
        assert_eq!(exp.xp_to_next, 100);
    }
}
