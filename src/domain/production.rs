//! Kitchen production manifest.
//!
//! Groups every line of a batch of orders by what the kitchen has to make:
//! the item name followed by its customizations, in the order they were
//! entered. Two lines group together only when that text matches exactly.

use super::cart::CartItem;
use super::order::Order;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Item name followed by its customizations.
    pub item: String,
    pub quantity: u64,
}

/// The text two lines must share to be produced together.
pub fn grouping_key(line: &CartItem) -> String {
    format!("{} {}", line.menu_item.name, line.customizations.join(" "))
        .trim()
        .to_string()
}

/// Sums line quantities per grouping key across every order in the batch.
///
/// Each key appears once. Entries come out in first-seen order, which is not
/// part of the contract; callers that present the manifest should sort it.
/// The same order passed twice counts twice.
pub fn aggregate<'a, I>(orders: I) -> Vec<ManifestEntry>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<ManifestEntry> = Vec::new();

    for line in orders.into_iter().flat_map(|order| order.items.iter()) {
        let key = grouping_key(line);
        match index.get(&key) {
            Some(&slot) => entries[slot].quantity += u64::from(line.quantity),
            None => {
                index.insert(key.clone(), entries.len());
                entries.push(ManifestEntry {
                    item: key,
                    quantity: u64::from(line.quantity),
                });
            }
        }
    }

    entries
}

/// Sorts a manifest by item text for stable presentation.
pub fn sorted(mut entries: Vec<ManifestEntry>) -> Vec<ManifestEntry> {
    entries.sort_by(|a, b| a.item.cmp(&b.item));
    entries
}
