//! In-memory inventory store.
//!
//! Used by tests and by `INVENTORY_BACKEND=memory` deployments. Contents are
//! lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    Attributes, ConditionalUpdate, InventoryStore, ItemKey, StoreError, StoredItem,
};

/// Ordered map of records behind one lock.
///
/// `atomic_update` checks and applies the whole batch under the write lock,
/// so readers never see half of a batch.
#[derive(Default)]
pub struct InMemoryInventoryStore {
    items: RwLock<BTreeMap<ItemKey, Attributes>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn get(&self, key: &ItemKey) -> Result<Option<StoredItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.get(key).map(|attributes| StoredItem {
            key: key.clone(),
            attributes: attributes.clone(),
        }))
    }

    async fn query_prefix(
        &self,
        partition: &str,
        prefix: &str,
    ) -> Result<Vec<StoredItem>, StoreError> {
        let items = self.items.read().await;
        let start = ItemKey::new(partition, prefix);
        Ok(items
            .range(start..)
            .take_while(|(key, _)| key.partition == partition && key.sort.starts_with(prefix))
            .map(|(key, attributes)| StoredItem {
                key: key.clone(),
                attributes: attributes.clone(),
            })
            .collect())
    }

    async fn put(&self, item: StoredItem) -> Result<(), StoreError> {
        self.items.write().await.insert(item.key, item.attributes);
        Ok(())
    }

    async fn atomic_update(&self, updates: Vec<ConditionalUpdate>) -> Result<(), StoreError> {
        let mut items = self.items.write().await;

        for update in &updates {
            let satisfied = items
                .get(&update.key)
                .is_some_and(|attributes| update.is_satisfied_by(attributes));
            if !satisfied {
                return Err(StoreError::conflict(update.key.clone(), &update.field));
            }
        }

        for update in updates {
            if let Some(attributes) = items.get_mut(&update.key) {
                attributes.insert(update.field, serde_json::Value::String(update.new));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(partition: &str, sort: &str, equipped: &str) -> StoredItem {
        let mut attributes = Attributes::new();
        attributes.insert("equipped".to_string(), json!(equipped));
        StoredItem {
            key: ItemKey::new(partition, sort),
            attributes,
        }
    }

    fn update(partition: &str, sort: &str, expected: &str, new: &str) -> ConditionalUpdate {
        ConditionalUpdate {
            key: ItemKey::new(partition, sort),
            field: "equipped".to_string(),
            expected: expected.to_string(),
            new: new.to_string(),
        }
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let store = InMemoryInventoryStore::new();
        let result = store.get(&ItemKey::new("p1", "character_c1")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn put_overwrites_whole_record() {
        let store = InMemoryInventoryStore::new();
        store.put(item("p1", "character_c1", "w1")).await.unwrap();
        store.put(item("p1", "character_c1", "none")).await.unwrap();

        let got = store
            .get(&ItemKey::new("p1", "character_c1"))
            .await
            .unwrap()
            .expect("item");
        assert_eq!(got.attributes["equipped"], json!("none"));
    }

    #[tokio::test]
    async fn query_prefix_stays_within_partition_and_prefix() {
        let store = InMemoryInventoryStore::new();
        store.put(item("p1", "character_a", "none")).await.unwrap();
        store.put(item("p1", "character_b", "none")).await.unwrap();
        store.put(item("p1", "weapon_a", "none")).await.unwrap();
        store.put(item("p2", "character_c", "none")).await.unwrap();
        store.put(item("p0", "character_z", "none")).await.unwrap();

        let characters = store.query_prefix("p1", "character_").await.unwrap();
        let sorts: Vec<_> = characters.iter().map(|i| i.key.sort.as_str()).collect();
        assert_eq!(sorts, vec!["character_a", "character_b"]);

        let all = store.query_prefix("p1", "").await.unwrap();
        assert_eq!(all.len(), 3);

        assert!(store.query_prefix("p3", "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn atomic_update_applies_all_when_conditions_hold() {
        let store = InMemoryInventoryStore::new();
        store.put(item("p1", "character_c1", "none")).await.unwrap();
        store.put(item("p1", "weapon_w1", "none")).await.unwrap();

        store
            .atomic_update(vec![
                update("p1", "character_c1", "none", "w1"),
                update("p1", "weapon_w1", "none", "c1"),
            ])
            .await
            .unwrap();

        let c = store.get(&ItemKey::new("p1", "character_c1")).await.unwrap().unwrap();
        let w = store.get(&ItemKey::new("p1", "weapon_w1")).await.unwrap().unwrap();
        assert_eq!(c.attributes["equipped"], json!("w1"));
        assert_eq!(w.attributes["equipped"], json!("c1"));
    }

    #[tokio::test]
    async fn atomic_update_applies_nothing_when_any_condition_fails() {
        let store = InMemoryInventoryStore::new();
        store.put(item("p1", "character_c1", "none")).await.unwrap();
        store.put(item("p1", "weapon_w1", "c2")).await.unwrap();

        let err = store
            .atomic_update(vec![
                update("p1", "character_c1", "none", "w1"),
                update("p1", "weapon_w1", "none", "c1"),
            ])
            .await
            .unwrap_err();

        match err {
            StoreError::Conflict { key, field } => {
                assert_eq!(key, ItemKey::new("p1", "weapon_w1"));
                assert_eq!(field, "equipped");
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let c = store.get(&ItemKey::new("p1", "character_c1")).await.unwrap().unwrap();
        assert_eq!(c.attributes["equipped"], json!("none"));
    }

    #[tokio::test]
    async fn atomic_update_on_missing_item_conflicts() {
        let store = InMemoryInventoryStore::new();
        let err = store
            .atomic_update(vec![update("p1", "character_c1", "none", "w1")])
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn atomic_update_on_missing_field_conflicts() {
        let store = InMemoryInventoryStore::new();
        store
            .put(StoredItem {
                key: ItemKey::new("p1", "character_c1"),
                attributes: Attributes::new(),
            })
            .await
            .unwrap();

        let err = store
            .atomic_update(vec![update("p1", "character_c1", "none", "w1")])
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let store = InMemoryInventoryStore::new();
        store.atomic_update(vec![]).await.unwrap();
    }
}
