//! Inventory system
//!
//! The player's carried items, kept in pickup order.

use serde::{Deserialize, Serialize};
use super::item::Item;

/// Player inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item; duplicates are allowed
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Items in pickup order
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_pickup_order_and_duplicates() {
        let mut inventory = Inventory::new();
        inventory.add_item(Item::potion(25));
        inventory.add_item(Item::potion(10));
        inventory.add_item(Item::potion(25));

        assert_eq!(inventory.count(), 3);
        assert_eq!(
            inventory.items(),
            &[Item::potion(25), Item::potion(10), Item::potion(25)]
        );
    }
}
