use crate::domain::order::Order;
use crate::domain::ports::OrderStore;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// An order log kept in a JSON file holding an array of orders.
///
/// The whole log is loaded on open. Each append rewrites the file through a
/// sibling temp file and a rename, so a reader of the file sees either the old
/// log or the new one. Appends are serialized by `writer`; the in-memory log is
/// only write-locked to swap in the new version, so `list_all` never waits on
/// disk I/O.
///
/// This struct is thread-safe (`Clone` shares the underlying log).
#[derive(Clone)]
pub struct JsonFileOrderStore {
    path: PathBuf,
    orders: Arc<RwLock<Vec<Order>>>,
    writer: Arc<Mutex<()>>,
}

impl JsonFileOrderStore {
    /// Opens the log at `path`, starting empty if the file does not exist.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let orders: Vec<Order> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), orders = orders.len(), "order log opened");

        Ok(Self::with_orders(path, orders))
    }

    fn with_orders(path: PathBuf, orders: Vec<Order>) -> Self {
        Self {
            path,
            orders: Arc::new(RwLock::new(orders)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderStore for JsonFileOrderStore {
    async fn append(&self, order: Order) -> Result<()> {
        let _writer = self.writer.lock().await;
        let mut next = self.orders.read().await.clone();
        next.push(order);

        let bytes = serde_json::to_vec_pretty(&next)?;
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&tmp, &self.path, bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %cleanup, "could not remove temp order log");
            }
            return Err(e.into());
        }

        let count = next.len();
        *self.orders.write().await = next;
        debug!(path = %self.path.display(), orders = count, "order log written");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: Vec<u8>) -> std::io::Result<()> {
    tokio::fs::write(tmp, bytes).await?;
    tokio::fs::rename(tmp, path).await
}
