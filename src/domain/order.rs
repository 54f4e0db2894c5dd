use super::cart::{Cart, CartItem};
use super::customer::CustomerInfo;
use super::money::Money;
use crate::error::{OrderError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Time-ordered id, so ids sort roughly by submission.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A paid order, frozen at submission and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub student_name: String,
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Submission date.
    pub date: NaiveDate,
    pub items: Vec<CartItem>,
    pub customer: CustomerInfo,
    pub payment_reference: String,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl Order {
    /// Snapshots the cart into an order. The student and room of the first
    /// line become the order's delivery context.
    pub fn freeze(
        cart: &Cart,
        customer: CustomerInfo,
        payment_reference: impl Into<String>,
        school: Option<String>,
        submitted_on: NaiveDate,
    ) -> Result<Self> {
        let first = cart.items().first().ok_or(OrderError::EmptyCart)?;

        Ok(Self {
            id: OrderId::generate(),
            student_name: first.student_name.clone(),
            room: first.room.clone(),
            school,
            date: submitted_on,
            items: cart.items().to_vec(),
            customer,
            payment_reference: payment_reference.into(),
            subtotal: cart.subtotal(),
            delivery_fee: cart.delivery_fee(),
            total: cart.grand_total(),
        })
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
