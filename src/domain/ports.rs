use super::menu::MenuItem;
use super::money::Money;
use super::order::Order;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Read-only source of orderable items.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>>;

    async fn find(&self, id: u32) -> Result<Option<MenuItem>> {
        Ok(self
            .list_menu_items()
            .await?
            .into_iter()
            .find(|item| item.id == id))
    }
}

/// Shared, append-only log of finalized orders.
///
/// Appends must be atomic with respect to each other. `list_all` returns a
/// point-in-time snapshot and must not block appends for longer than the copy.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn append(&self, order: Order) -> Result<()>;
    async fn list_all(&self) -> Result<Vec<Order>>;
}

/// Context sent along with an authorization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationMetadata {
    pub item_count: u64,
    pub submitted_at: DateTime<Utc>,
}

/// What the payment provider hands back for a successful authorization.
///
/// `handle` is the opaque secret the capture widget needs; `reference` is the
/// provider's id for the payment and ends up on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub handle: String,
    pub reference: String,
}

/// External payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_authorization(
        &self,
        amount: Money,
        metadata: &AuthorizationMetadata,
    ) -> Result<Authorization>;

    async fn confirm(&self, handle: &str) -> Result<()>;
}

pub type CatalogRef = Arc<dyn Catalog>;
pub type OrderStoreRef = Arc<dyn OrderStore>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
