//! Application layer orchestrating the checkout flow.
//!
//! This module defines the `CheckoutSession` which walks one customer's cart
//! through payment authorization, customer validation and confirmation, and
//! records the resulting order in the shared order store.

pub mod checkout;
