//! Item system

pub mod item;
pub mod inventory;

pub use item::Item;
pub use inventory::Inventory;
