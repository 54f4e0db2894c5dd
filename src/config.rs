//! Tunable business settings.
//!
//! Defaults match the tuckshop's published terms; the CLI can override each
//! value through flags.

use crate::domain::money::Money;
use std::time::Duration;

/// Delivery surcharge rules applied by every cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Subtotals at or above this amount ship free.
    pub free_delivery_threshold: Money,
    /// Flat surcharge below the threshold.
    pub delivery_fee: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: Money::from_cents(5000),
            delivery_fee: Money::from_cents(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Upper bound on a single payment gateway call. On expiry the session
    /// fails with a retryable error.
    pub gateway_timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            gateway_timeout: Duration::from_secs(30),
        }
    }
}
