//! Snapshot-backed cart store.
//!
//! Holds the whole cart table in memory behind one lock and rewrites a
//! single JSON file on every mutation. The file is written to a sibling
//! temp path and renamed into place, so a crash mid-write never leaves a
//! half-written table behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use botique_core::cart::store::CartStore;
use botique_types::cart::{Cart, LineItem, UserId};
use botique_types::error::CartError;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// File-snapshot implementation of [`CartStore`].
///
/// The table is a `BTreeMap` so the snapshot serializes with numerically
/// sorted keys. In the file, each key is the stringified user id and each
/// value the user's lines as `[code, name, quantity, unit_price]` rows:
///
/// ```json
/// {
///   "123456789": [
///     ["cpu-7700", "Ryzen 7 7700", 1, 27990]
///   ]
/// }
/// ```
///
/// The lock is held across the flush, which serializes mutations and
/// guarantees the returned `Ok` means "on disk". A failed flush leaves
/// the in-memory change in place and the previous snapshot on disk; the
/// error tells the caller the mutation is not durable.
pub struct SnapshotCartStore {
    path: PathBuf,
    table: Mutex<BTreeMap<UserId, Cart>>,
}

impl SnapshotCartStore {
    /// Create a store persisting to `path`.
    ///
    /// No I/O happens here; call [`CartStore::load`] before serving.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: Mutex::new(BTreeMap::new()),
        }
    }

    /// Path of the canonical snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the table and replace the snapshot file atomically.
    ///
    /// The rename is the commit point; a crash before it leaves the
    /// previous snapshot intact.
    async fn flush(&self, table: &BTreeMap<UserId, Cart>) -> Result<(), CartError> {
        let json = serde_json::to_vec_pretty(table)
            .map_err(|err| CartError::Persist(format!("serialize cart table: {err}")))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|err| CartError::Persist(format!("write {}: {err}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| CartError::Persist(format!("replace {}: {err}", self.path.display())))?;

        debug!(users = table.len(), "Cart snapshot written");
        Ok(())
    }
}

impl CartStore for SnapshotCartStore {
    async fn load(&self) -> Result<(), CartError> {
        let loaded = match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<UserId, Cart>>(&bytes) {
                Ok(table) => table,
                Err(err) => {
                    warn!(
                        "Snapshot {} is unreadable ({err}), starting with an empty cart table",
                        self.path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "No snapshot at {}, starting with an empty cart table",
                    self.path.display()
                );
                BTreeMap::new()
            }
            Err(err) => {
                warn!(
                    "Snapshot {} is unreadable ({err}), starting with an empty cart table",
                    self.path.display()
                );
                BTreeMap::new()
            }
        };

        let mut table = self.table.lock().await;
        *table = loaded;
        debug!(users = table.len(), "Cart table loaded");
        Ok(())
    }

    async fn get_cart(&self, user: UserId) -> Result<Cart, CartError> {
        let table = self.table.lock().await;
        Ok(table.get(&user).cloned().unwrap_or_default())
    }

    async fn set_cart(&self, user: UserId, items: Vec<LineItem>) -> Result<(), CartError> {
        let mut table = self.table.lock().await;
        table.insert(user, Cart::from_items(items));
        self.flush(&table).await
    }

    async fn clear_cart(&self, user: UserId) -> Result<(), CartError> {
        let mut table = self.table.lock().await;
        table.insert(user, Cart::new());
        self.flush(&table).await
    }

    async fn add_item(&self, user: UserId, item: LineItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let mut table = self.table.lock().await;
        table.entry(user).or_default().add(item);
        self.flush(&table).await
    }
}
