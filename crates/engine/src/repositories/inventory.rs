//! Inventory entity operations.

use std::sync::Arc;

use armory_domain::{
    Character, CharacterId, EntityKind, InventoryEntity, KeySchema, PlayerId, Weapon, WeaponId,
};

use crate::infrastructure::ports::{ConditionalUpdate, InventoryStore, ItemKey, StoreError};

use super::records;

/// Typed access to the inventory store.
///
/// Every call goes to the store. Nothing is cached here: a cached equip slot
/// could be stale relative to the store's precondition check.
pub struct Inventory {
    store: Arc<dyn InventoryStore>,
    schema: Arc<KeySchema>,
}

impl Inventory {
    pub fn new(store: Arc<dyn InventoryStore>, schema: Arc<KeySchema>) -> Self {
        Self { store, schema }
    }

    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    pub fn key(&self, player_id: &PlayerId, kind: EntityKind, local_id: &str) -> ItemKey {
        records::item_key(&self.schema, player_id, kind, local_id)
    }

    // =========================================================================
    // Point reads
    // =========================================================================

    pub async fn get_character(
        &self,
        player_id: &PlayerId,
        character_id: &CharacterId,
    ) -> Result<Option<Character>, StoreError> {
        let key = self.key(player_id, EntityKind::Character, character_id.as_str());
        self.store
            .get(&key)
            .await?
            .map(|item| records::decode_character(&self.schema, &item))
            .transpose()
    }

    pub async fn get_weapon(
        &self,
        player_id: &PlayerId,
        weapon_id: &WeaponId,
    ) -> Result<Option<Weapon>, StoreError> {
        let key = self.key(player_id, EntityKind::Weapon, weapon_id.as_str());
        self.store
            .get(&key)
            .await?
            .map(|item| records::decode_weapon(&self.schema, &item))
            .transpose()
    }

    // =========================================================================
    // Prefix queries
    // =========================================================================

    pub async fn list_characters(&self, player_id: &PlayerId) -> Result<Vec<Character>, StoreError> {
        let prefix = self.schema.prefix(EntityKind::Character);
        self.store
            .query_prefix(player_id.as_str(), prefix)
            .await?
            .iter()
            .map(|item| records::decode_character(&self.schema, item))
            .collect()
    }

    pub async fn list_weapons(&self, player_id: &PlayerId) -> Result<Vec<Weapon>, StoreError> {
        let prefix = self.schema.prefix(EntityKind::Weapon);
        self.store
            .query_prefix(player_id.as_str(), prefix)
            .await?
            .iter()
            .map(|item| records::decode_weapon(&self.schema, item))
            .collect()
    }

    /// Every entity in the player's partition.
    ///
    /// Records whose sort key matches no known prefix are skipped with a
    /// warning rather than failing the whole listing.
    pub async fn list_all(&self, player_id: &PlayerId) -> Result<Vec<InventoryEntity>, StoreError> {
        let items = self.store.query_prefix(player_id.as_str(), "").await?;

        let mut entities = Vec::with_capacity(items.len());
        for item in &items {
            match self.schema.split_sort_key(&item.key.sort) {
                Some((EntityKind::Character, _)) => {
                    entities.push(records::decode_character(&self.schema, item)?.into());
                }
                Some((EntityKind::Weapon, _)) => {
                    entities.push(records::decode_weapon(&self.schema, item)?.into());
                }
                None => {
                    tracing::warn!(key = %item.key, "Skipping record with unknown sort key prefix");
                }
            }
        }
        Ok(entities)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Unconditional upsert. Only used for creation.
    pub async fn save_character(&self, character: &Character) -> Result<(), StoreError> {
        self.store
            .put(records::encode_character(&self.schema, character))
            .await
    }

    /// Unconditional upsert. Only used for creation.
    pub async fn save_weapon(&self, weapon: &Weapon) -> Result<(), StoreError> {
        self.store
            .put(records::encode_weapon(&self.schema, weapon))
            .await
    }

    /// Submit a conditional batch to the store as one atomic unit.
    pub async fn commit(&self, updates: Vec<ConditionalUpdate>) -> Result<(), StoreError> {
        self.store.atomic_update(updates).await
    }
}
