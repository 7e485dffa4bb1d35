//! Weapon entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::keys::{EntityKind, KeySchema};
use crate::value_objects::{EquipSlot, WeaponName};
use crate::{CharacterId, PlayerId, WeaponDataId, WeaponId};

/// A weapon record.
///
/// `equipped_on` mirrors [`crate::Character::equipped`] from the weapon side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weapon {
    player_id: PlayerId,
    weapon_id: WeaponId,
    weapon_data_id: WeaponDataId,
    weapon_name: WeaponName,
    equipped_on: EquipSlot<CharacterId>,
    created_at: DateTime<Utc>,
}

impl Weapon {
    /// Create a new, unequipped weapon with a freshly allocated id.
    pub fn new(
        player_id: PlayerId,
        weapon_data_id: WeaponDataId,
        weapon_name: WeaponName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            player_id,
            weapon_id: WeaponId::generate(),
            weapon_data_id,
            weapon_name,
            equipped_on: EquipSlot::Empty,
            created_at: now,
        }
    }

    /// Rebuild a weapon from persisted parts.
    pub fn from_parts(
        player_id: PlayerId,
        weapon_id: WeaponId,
        weapon_data_id: WeaponDataId,
        weapon_name: WeaponName,
        equipped_on: EquipSlot<CharacterId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player_id,
            weapon_id,
            weapon_data_id,
            weapon_name,
            equipped_on,
            created_at,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn id(&self) -> &WeaponId {
        &self.weapon_id
    }

    pub fn weapon_data_id(&self) -> &WeaponDataId {
        &self.weapon_data_id
    }

    pub fn name(&self) -> &WeaponName {
        &self.weapon_name
    }

    pub fn equipped_on(&self) -> &EquipSlot<CharacterId> {
        &self.equipped_on
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sort_key(&self, schema: &KeySchema) -> String {
        schema.sort_key(EntityKind::Weapon, self.weapon_id.as_str())
    }
}
