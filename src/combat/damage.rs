//! Damage resolution
//!
//! Applies damage and healing while keeping health inside `0..=max`,
//! and resolves melee attacks between characters.

use hecs::{Entity, World};

use crate::ecs::{AttackPower, Enemy, Health, Player};
use crate::progression::{award_experience, LevelUpRules};

/// Result of a melee attack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage dealt (0 when the attack did not happen)
    pub damage: i32,
    /// Whether the target died from this attack
    pub killed: bool,
    /// XP awarded to the player for the kill
    pub experience_gained: u32,
    pub levels_gained: u32,
}

/// Subtract damage, flooring at zero. No effect on the dead.
pub fn apply_damage(health: &mut Health, amount: i32) {
    if health.is_dead() {
        return;
    }
    health.current = (health.current - amount.max(0)).max(0);
}

/// Restore health up to max. Works on any health value, including zero,
/// but has no revive semantics beyond moving the number.
pub fn heal(health: &mut Health, amount: i32) {
    health.current = (health.current + amount.max(0)).min(health.max);
}

/// Whether an entity exists and has health above zero
pub fn is_alive(world: &World, entity: Option<Entity>) -> bool {
    entity
        .and_then(|e| world.get::<&Health>(e).ok().map(|h| h.is_alive()))
        .unwrap_or(false)
}

/// Resolve one attack from `attacker` on `target`.
///
/// Does nothing unless both are alive. Damage is the attacker's flat
/// attack power. A player killing an enemy earns the enemy's XP value.
pub fn attack(
    world: &mut World,
    attacker: Entity,
    target: Entity,
    rules: &LevelUpRules,
) -> AttackResult {
    if !is_alive(world, Some(attacker)) || !is_alive(world, Some(target)) {
        return AttackResult::default();
    }

    let damage = world
        .get::<&AttackPower>(attacker)
        .map(|a| a.0)
        .unwrap_or(0);

    let killed = match world.get::<&mut Health>(target) {
        Ok(mut health) => {
            apply_damage(&mut health, damage);
            health.is_dead()
        }
        Err(_) => false,
    };

    let mut result = AttackResult {
        damage,
        killed,
        ..AttackResult::default()
    };

    if killed && world.get::<&Player>(attacker).is_ok() {
        let reward = world.get::<&Enemy>(target).ok().map(|e| e.experience_value);
        if let Some(xp) = reward {
            result.experience_gained = xp;
            result.levels_gained = award_experience(world, Some(attacker), xp, rules);
        }
    }

    result
}
