//! Inventory read operations.
//!
//! Every read goes straight to the store; no entity state is kept here.

use std::sync::Arc;

use armory_domain::{
    Character, CharacterId, EntityKind, InventoryEntity, PlayerId, Weapon, WeaponId,
};

use crate::repositories::Inventory;

use super::error::InventoryError;

/// Inventory queries.
pub struct InventoryOps {
    inventory: Arc<Inventory>,
}

impl InventoryOps {
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Self { inventory }
    }

    /// All characters owned by the player. Empty for an unknown player.
    pub async fn list_characters(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<Character>, InventoryError> {
        Ok(self.inventory.list_characters(player_id).await?)
    }

    pub async fn list_weapons(&self, player_id: &PlayerId) -> Result<Vec<Weapon>, InventoryError> {
        Ok(self.inventory.list_weapons(player_id).await?)
    }

    pub async fn list_all(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<InventoryEntity>, InventoryError> {
        Ok(self.inventory.list_all(player_id).await?)
    }

    pub async fn get_character(
        &self,
        player_id: &PlayerId,
        character_id: &CharacterId,
    ) -> Result<Character, InventoryError> {
        self.inventory
            .get_character(player_id, character_id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Character, character_id))
    }

    pub async fn get_weapon(
        &self,
        player_id: &PlayerId,
        weapon_id: &WeaponId,
    ) -> Result<Weapon, InventoryError> {
        self.inventory
            .get_weapon(player_id, weapon_id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Weapon, weapon_id))
    }
}
