//! Read-only queries for presentation layers.
//!
//! Every answer is an [`Envelope`]: `{"success": true, "count": n, "data": [...]}`
//! on success, `{"success": false, "message": "..."}` when a collaborator
//! failed.

use crate::domain::menu::MenuItem;
use crate::domain::order::Order;
use crate::domain::ports::{CatalogRef, OrderStoreRef};
use crate::domain::production::{self, ManifestEntry};
use crate::error::Result;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            message: Some(message.into()),
        }
    }

    fn from_result(result: Result<Vec<T>>, what: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                warn!(error = %e, "failed to load {what}");
                Self::failure(format!("Failed to load {what}: {e}"))
            }
        }
    }
}

pub struct QueryService {
    catalog: CatalogRef,
    orders: OrderStoreRef,
}

impl QueryService {
    pub fn new(catalog: CatalogRef, orders: OrderStoreRef) -> Self {
        Self { catalog, orders }
    }

    pub async fn list_menu_items(&self) -> Envelope<MenuItem> {
        Envelope::from_result(self.catalog.list_menu_items().await, "menu")
    }

    pub async fn list_orders(&self) -> Envelope<Order> {
        Envelope::from_result(self.orders.list_all().await, "orders")
    }

    /// Manifest over a snapshot of the order log, sorted by item.
    pub async fn production_manifest(&self) -> Envelope<ManifestEntry> {
        let manifest = self
            .orders
            .list_all()
            .await
            .map(|orders| production::sorted(production::aggregate(&orders)));
        Envelope::from_result(manifest, "production list")
    }
}
