use super::money::Money;
use serde::{Deserialize, Serialize};

/// A catalog entry that cart lines are built from.
///
/// Owned by the catalog; cart lines keep their own copy so later catalog
/// changes never reprice a line that is already in a cart or an order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: Money,
}

impl MenuItem {
    pub fn new(id: u32, name: impl Into<String>, category: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}
