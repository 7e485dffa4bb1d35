//! Inventory store port.

use async_trait::async_trait;

use super::error::StoreError;
use super::types::{ConditionalUpdate, ItemKey, StoredItem};

/// Keyed storage for every player's inventory.
///
/// Implementations must make [`InventoryStore::atomic_update`] all-or-nothing
/// and must evaluate its conditions against the latest committed state, so
/// that two overlapping batches whose conditions conflict are never both
/// accepted. That method is the only serialization point for equip state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Point read. `Ok(None)` when the key is absent.
    async fn get(&self, key: &ItemKey) -> Result<Option<StoredItem>, StoreError>;

    /// All records in `partition` whose sort key starts with `prefix`.
    /// An empty prefix selects the whole partition. Order is unspecified.
    async fn query_prefix(
        &self,
        partition: &str,
        prefix: &str,
    ) -> Result<Vec<StoredItem>, StoreError>;

    /// Unconditional upsert of a full record.
    async fn put(&self, item: StoredItem) -> Result<(), StoreError>;

    /// Apply every update or none. Fails with [`StoreError::Conflict`] if any
    /// condition does not hold at apply time.
    async fn atomic_update(&self, updates: Vec<ConditionalUpdate>) -> Result<(), StoreError>;
}
