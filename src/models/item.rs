use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog item that can be placed in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}
