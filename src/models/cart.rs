use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Item;

/// Shopping cart owned by a single user.
///
/// Quantity is represented by repetition: adding an item three times stores
/// three copies in `items`. `total` is kept equal to the sum of their prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub items: Vec<Item>,
    pub user: Option<CartOwner>,
    pub total: Decimal,
}

/// The owning user as seen from its cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartOwner {
    pub id: i64,
    pub username: String,
}

/// Request body shared by the add and remove endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCartRequest {
    pub username: String,
    pub item_id: i64,
    pub quantity: i32,
}

impl Cart {
    /// Create an empty cart with no owner attached
    pub fn new(id: i64) -> Self {
        Self {
            id,
            items: Vec::new(),
            user: None,
            total: Decimal::ZERO,
        }
    }

    pub fn for_owner(id: i64, owner: CartOwner) -> Self {
        Self {
            user: Some(owner),
            ..Self::new(id)
        }
    }

    /// Append one copy of `item` and add its price to the total
    pub fn add_item(&mut self, item: &Item) {
        self.items.push(item.clone());
        self.total += item.price;
    }

    /// Remove one copy of `item`, matched by id.
    ///
    /// Returns `false` and leaves the total untouched when the cart holds no
    /// copy of the item.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        match self.items.iter().position(|held| held.id == item.id) {
            Some(index) => {
                let removed = self.items.remove(index);
                self.total -= removed.price;
                true
            }
            None => false,
        }
    }

    /// Number of copies of the given item in the cart
    pub fn count_of(&self, item_id: i64) -> usize {
        self.items.iter().filter(|held| held.id == item_id).count()
    }

    /// Recompute `total` from the held items
    pub fn recalculate_total(&mut self) {
        self.total = self.items.iter().map(|item| item.price).sum();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ModifyCartRequest {
    pub fn new(username: impl Into<String>, item_id: i64, quantity: i32) -> Self {
        Self {
            username: username.into(),
            item_id,
            quantity,
        }
    }

    /// Number of copies to add or remove; non-positive quantities are a no-op
    pub fn copies(&self) -> usize {
        usize::try_from(self.quantity).unwrap_or(0)
    }
}
