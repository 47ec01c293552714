//! Experience and leveling
//!
//! XP accrual, level-up stat growth, and progression helpers.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::ecs::{AttackPower, Experience, Health};

/// Stat growth applied on every level-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUpRules {
    /// XP needed to go from level 1 to level 2
    pub first_threshold: u32,
    /// Added to both max and current health
    pub health_gain: i32,
    pub attack_gain: i32,
    /// Multiplier applied to the threshold after each level
    pub threshold_growth: f64,
}

impl Default for LevelUpRules {
    fn default() -> Self {
        Self {
            first_threshold: 100,
            health_gain: 20,
            attack_gain: 2,
            threshold_growth: 1.5,
        }
    }
}

/// Threshold for the level after one with `current`
pub fn next_threshold(current: u32, growth: f64) -> u32 {
    ((current as f64) * growth).round().max(1.0) as u32
}

/// Add XP and apply every level-up it pays for.
///
/// Returns the number of levels gained.
pub fn apply_experience(
    exp: &mut Experience,
    health: &mut Health,
    attack: &mut AttackPower,
    amount: u32,
    rules: &LevelUpRules,
) -> u32 {
    exp.current_xp = exp.current_xp.saturating_add(amount);

    let mut levels = 0;
    while exp.current_xp >= exp.xp_to_next {
        exp.current_xp -= exp.xp_to_next;
        level_up(exp, health, attack, rules);
        levels += 1;
    }
    levels
}

fn level_up(exp: &mut Experience, health: &mut Health, attack: &mut AttackPower, rules: &LevelUpRules) {
    exp.level += 1;

    // Current health rises by the same flat amount, it is not refilled
    health.max += rules.health_gain;
    health.current += rules.health_gain;
    debug_assert!(health.current <= health.max);

    attack.0 += rules.attack_gain;
    exp.xp_to_next = next_threshold(exp.xp_to_next, rules.threshold_growth);
}

/// Award XP to the player entity, if there is one.
///
/// Returns the number of levels gained (0 when the player is absent).
pub fn award_experience(
    world: &mut World,
    player: Option<Entity>,
    amount: u32,
    rules: &LevelUpRules,
) -> u32 {
    let Some(player) = player else {
        return 0;
    };

    match world.query_one_mut::<(&mut Experience, &mut Health, &mut AttackPower)>(player) {
        Ok((exp, health, attack)) => {
            let levels = apply_experience(exp, health, attack, amount, rules);
            if levels > 0 {
                log::info!("Player reached level {} (+{} levels)", exp.level, levels);
            }
            levels
        }
        Err(_) => 0,
    }
}

/// Get a title/rank based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        1..=2 => "Novice",
        3..=4 => "Apprentice",
        5..=7 => "Journeyman",
        8..=10 => "Adept",
        11..=14 => "Expert",
        _ => "Legend",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_player() -> (Experience, Health, AttackPower) {
        (Experience::new(100), Health::new(100), AttackPower(10))
    }

    #[test]
    fn test_xp_below_threshold() {
        let (mut exp, mut health, mut attack) = fresh_player();
        let levels = apply_experience(&mut exp, &mut health, &mut attack, 50, &LevelUpRules::default());
        assert_eq!(levels, 0);
        assert_eq!(exp.current_xp, 50);
        assert_eq!(exp.level, 1);
    }

    #[test]
    fn test_level_up_adds_health_to_current() {
        let (mut exp, mut health, mut attack) = fresh_player();
        health.current = 60;

        apply_experience(&mut exp, &mut health, &mut attack, 120, &LevelUpRules::default());

        assert_eq!(exp.level, 2);
        assert_eq!(exp.current_xp, 20);
        assert_eq!(health.max(), 120);
        assert_eq!(health.current(), 80);
        assert_eq!(attack.0, 12);
        assert_eq!(exp.xp_to_next, 150);
    }

    #[test]
    fn test_exact_threshold_is_one_level() {
        let (mut exp, mut health, mut attack) = fresh_player();
        let levels = apply_experience(&mut exp, &mut health, &mut attack, 100, &LevelUpRules::default());
        assert_eq!(levels, 1);
        assert_eq!(exp.current_xp, 0);
        assert_eq!(exp.xp_to_next, 150);
    }

    #[test]
    fn test_multiple_level_ups_in_one_award() {
        let (mut exp, mut health, mut attack) = fresh_player();
        health.current = 50;

        let levels = apply_experience(&mut exp, &mut health, &mut attack, 260, &LevelUpRules::default());

        assert_eq!(levels, 2);
        assert_eq!(exp.level, 3);
        assert_eq!(exp.current_xp, 10);
        assert_eq!(health.max(), 140);
        assert_eq!(health.current(), 90);
        assert_eq!(attack.0, 14);
        assert_eq!(exp.xp_to_next, 225);
    }

    #[test]
    fn test_two_and_a_half_thresholds() {
        let (mut exp, mut health, mut attack) = fresh_player();
        let levels = apply_experience(&mut exp, &mut health, &mut attack, 250, &LevelUpRules::default());
        assert_eq!(levels, 2);
        assert_eq!(exp.current_xp, 0);
    }

    #[test]
    fn test_threshold_rounds() {
        assert_eq!(next_threshold(100, 1.5), 150);
        assert_eq!(next_threshold(225, 1.5), 338);
        assert_eq!(next_threshold(1, 0.1), 1);
    }

    #[test]
    fn test_award_without_player_is_noop() {
        let mut world = World::new();
        assert_eq!(award_experience(&mut world, None, 500, &LevelUpRules::default()), 0);
    }

    #[test]
    fn test_award_on_world_entity() {
        let mut world = World::new();
        let player = world.spawn(fresh_player());
        let levels = award_experience(&mut world, Some(player), 100, &LevelUpRules::default());
        assert_eq!(levels, 1);
        let exp = world.get::<&Experience>(player).map(|e| *e).ok();
        assert_eq!(exp.map(|e| e.level), Some(2));
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Novice");
        assert_eq!(level_title(5), "Journeyman");
        assert_eq!(level_title(25), "Legend");
    }
}
