use crate::domain::menu::MenuItem;
use crate::domain::order::Order;
use crate::domain::ports::{Catalog, OrderStore};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A thread-safe in-memory order log.
///
/// Uses `Arc<RwLock<Vec<Order>>>` so every checkout session can share one
/// instance. Appends take the write lock for a single push; readers copy the
/// log under the read lock and aggregate the copy at their leisure.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `orders`, oldest first.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn append(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        debug!(order_id = %order.id, position = orders.len(), "appending order");
        orders.push(order);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }
}

/// A fixed menu held in memory.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    items: Arc<Vec<MenuItem>>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>> {
        Ok(self.items.as_ref().clone())
    }
}
