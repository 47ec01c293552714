//! Combat system

pub mod damage;

pub use damage::{apply_damage, attack, heal, is_alive, AttackResult};
