use super::menu::MenuItem;
use super::money::Money;
use crate::config::PricingConfig;
use crate::error::{OrderError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one line of a cart. Unique within the cart that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(u64);

impl LineId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-line delivery metadata and kitchen instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDetails {
    pub customizations: Vec<String>,
    pub student_name: String,
    pub room: String,
    pub delivery_date: NaiveDate,
    pub notes: Option<String>,
}

impl LineDetails {
    pub fn new(
        student_name: impl Into<String>,
        room: impl Into<String>,
        delivery_date: NaiveDate,
    ) -> Self {
        Self {
            customizations: Vec::new(),
            student_name: student_name.into(),
            room: room.into(),
            delivery_date,
            notes: None,
        }
    }

    pub fn with_customizations<I, S>(mut self, customizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customizations = customizations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// One orderable line: a menu item, how many, and for whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: LineId,
    pub menu_item: MenuItem,
    /// Always at least 1; a line driven to zero is removed instead.
    pub quantity: u32,
    pub customizations: Vec<String>,
    pub student_name: String,
    pub room: String,
    pub delivery_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartItem {
    /// Unit price times quantity. Customizations never change the price.
    pub fn line_total(&self) -> Money {
        self.menu_item.price * self.quantity
    }
}

/// The lines a caregiver is composing, in insertion order.
///
/// Totals are recomputed from the lines on every read, so they can never
/// disagree with the current contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    next_line: u64,
    pricing: PricingConfig,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl Cart {
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            items: Vec::new(),
            next_line: 1,
            pricing,
        }
    }

    /// Appends a new line and returns its freshly issued id.
    pub fn add(&mut self, menu_item: &MenuItem, quantity: i32, details: LineDetails) -> Result<LineId> {
        let quantity = positive(quantity)?;
        let id = LineId(self.next_line);
        self.next_line += 1;

        self.items.push(CartItem {
            id,
            menu_item: menu_item.clone(),
            quantity,
            customizations: details.customizations,
            student_name: details.student_name,
            room: details.room,
            delivery_date: details.delivery_date,
            notes: details.notes,
        });
        Ok(id)
    }

    /// Sets a line's quantity. Zero or less removes the line, and removing a
    /// line that is already gone is not an error.
    pub fn update_quantity(&mut self, id: LineId, quantity: i32) -> Result<()> {
        if quantity <= 0 {
            self.remove(id);
            return Ok(());
        }

        let line = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(OrderError::LineNotFound(id))?;
        line.quantity = positive(quantity)?;
        Ok(())
    }

    /// Removes a line if present.
    pub fn remove(&mut self, id: LineId) {
        self.items.retain(|item| item.id != id);
    }

    pub fn get(&self, id: LineId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Free once the subtotal reaches the threshold; an empty cart owes nothing.
    pub fn delivery_fee(&self) -> Money {
        let subtotal = self.subtotal();
        if self.is_empty() || subtotal >= self.pricing.free_delivery_threshold {
            Money::ZERO
        } else {
            self.pricing.delivery_fee
        }
    }

    pub fn grand_total(&self) -> Money {
        self.subtotal() + self.delivery_fee()
    }

    /// Total number of units across all lines, not the number of lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Empties the cart. Line ids keep counting up so an id is never reused.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

fn positive(quantity: i32) -> Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(OrderError::InvalidQuantity { quantity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn platter() -> MenuItem {
        MenuItem::new(4, "Salmon Sushi Mix Platter", "Sushi", Money::new(dec!(54.99)).unwrap())
    }

    fn roll() -> MenuItem {
        MenuItem::new(2, "Salmon Plain Roll", "Sushi", Money::new(dec!(1.50)).unwrap())
    }

    fn details() -> LineDetails {
        LineDetails::new(
            "Tim Serrano",
            "Room 420",
            NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
        )
    }

    #[test]
    fn test_platter_example_totals() {
        let mut cart = Cart::default();
        cart.add(
            &platter(),
            3,
            details().with_customizations(["Extra Kewpie Mayo Sauce"]),
        )
        .unwrap();

        assert_eq!(cart.subtotal(), Money::new(dec!(164.97)).unwrap());
        assert_eq!(cart.delivery_fee(), Money::ZERO);
        assert_eq!(cart.grand_total(), Money::new(dec!(164.97)).unwrap());
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.add(&roll(), 0, details()),
            Err(OrderError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            cart.add(&roll(), -2, details()),
            Err(OrderError::InvalidQuantity { quantity: -2 })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_ids_are_unique_and_ordered() {
        let mut cart = Cart::default();
        let a = cart.add(&roll(), 1, details()).unwrap();
        let b = cart.add(&roll(), 1, details()).unwrap();
        cart.remove(a);
        let c = cart.add(&roll(), 1, details()).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        let ids: Vec<LineId> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![b, c]);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_idempotently() {
        let mut cart = Cart::default();
        let id = cart.add(&roll(), 2, details()).unwrap();

        cart.update_quantity(id, 0).unwrap();
        assert!(cart.get(id).is_none());
        cart.update_quantity(id, 0).unwrap();
        cart.update_quantity(id, -1).unwrap();
        cart.remove(id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_line() {
        let mut cart = Cart::default();
        let id = cart.add(&roll(), 2, details()).unwrap();
        cart.remove(id);

        assert!(matches!(
            cart.update_quantity(id, 3),
            Err(OrderError::LineNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn test_update_quantity_in_place() {
        let mut cart = Cart::default();
        let first = cart.add(&roll(), 1, details()).unwrap();
        let second = cart.add(&platter(), 1, details()).unwrap();

        cart.update_quantity(first, 5).unwrap();
        assert_eq!(cart.items()[0].id, first);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[1].id, second);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_delivery_fee_threshold_boundary() {
        let fifty = MenuItem::new(9, "Party Box", "Sushi", Money::new(dec!(50.00)).unwrap());
        let just_under = MenuItem::new(10, "Bento", "Sushi", Money::new(dec!(49.99)).unwrap());

        let mut at = Cart::default();
        at.add(&fifty, 1, details()).unwrap();
        assert_eq!(at.delivery_fee(), Money::ZERO);
        assert_eq!(at.grand_total(), Money::new(dec!(50.00)).unwrap());

        let mut under = Cart::default();
        under.add(&just_under, 1, details()).unwrap();
        assert_eq!(under.delivery_fee(), Money::new(dec!(5.00)).unwrap());
        assert_eq!(under.grand_total(), Money::new(dec!(54.99)).unwrap());
    }

    #[test]
    fn test_custom_pricing() {
        let pricing = PricingConfig {
            free_delivery_threshold: Money::new(dec!(10)).unwrap(),
            delivery_fee: Money::new(dec!(2.50)).unwrap(),
        };
        let mut cart = Cart::new(pricing);
        let id = cart.add(&roll(), 2, details()).unwrap();
        assert_eq!(cart.grand_total(), Money::new(dec!(5.50)).unwrap());

        cart.update_quantity(id, 7).unwrap();
        assert_eq!(cart.grand_total(), Money::new(dec!(10.50)).unwrap());
    }

    #[test]
    fn test_empty_cart_owes_nothing() {
        let cart = Cart::default();
        assert_eq!(cart.subtotal(), Money::ZERO);
        assert_eq!(cart.delivery_fee(), Money::ZERO);
        assert_eq!(cart.grand_total(), Money::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_item_count_of_huge_quantities() {
        let mut cart = Cart::default();
        for _ in 0..3 {
            cart.add(&roll(), i32::MAX, details()).unwrap();
        }

        assert_eq!(cart.item_count(), 3 * u64::from(i32::MAX.unsigned_abs()));
        assert_eq!(cart.subtotal(), Money::new(dec!(9663676411.50)).unwrap());
    }

    #[test]
    fn test_customizations_do_not_change_price() {
        let mut cart = Cart::default();
        cart.add(
            &roll(),
            2,
            details().with_customizations(["No Wasabi", "No Wasabi", "Extra Ginger"]),
        )
        .unwrap();
        assert_eq!(cart.items()[0].line_total(), Money::new(dec!(3.00)).unwrap());
        assert_eq!(cart.items()[0].customizations.len(), 3);
    }
}
