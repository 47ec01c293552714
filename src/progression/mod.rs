//! Progression systems

pub mod xp;

pub use xp::{LevelUpRules, apply_experience, award_experience, level_title, next_threshold};
