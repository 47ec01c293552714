//! Item definitions
//!
//! Items lying on the map or carried in the player's inventory.

use serde::{Deserialize, Serialize};

use super::Inventory;

/// A pickable item. Closed set of kinds; new kinds get a new variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// Restores health when drunk
    Potion { healing_amount: i32 },
}

impl Item {
    pub fn potion(healing_amount: i32) -> Self {
        Item::Potion { healing_amount }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Item::Potion { .. } => "Potion",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Item::Potion { .. } => '!',
        }
    }

    /// Effect of walking onto the item.
    ///
    /// Potions are only stored; they are not consumed on pickup.
    pub fn on_pickup(self, inventory: &mut Inventory) {
        match self {
            Item::Potion { .. } => inventory.add_item(self),
        }
    }
}
