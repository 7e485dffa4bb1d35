//! Character entity - a playable character owned by one player.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::keys::{EntityKind, KeySchema};
use crate::value_objects::{CharacterName, EquipSlot};
use crate::{CharacterDataId, CharacterId, PlayerId, WeaponId};

/// A character record.
///
/// # Invariants
///
/// - `equipped` is either empty or the local id of a weapon whose
///   `equipped_on` names this character. Only the equip transaction may
///   change it, so the type offers no setter.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use armory_domain::{Character, CharacterDataId, CharacterName, PlayerId};
///
/// let character = Character::new(
///     PlayerId::new("p1").unwrap(),
///     CharacterDataId::new("knight").unwrap(),
///     CharacterName::default(),
///     Utc::now(),
/// );
/// assert!(character.equipped().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    player_id: PlayerId,
    character_id: CharacterId,
    character_data_id: CharacterDataId,
    character_name: CharacterName,
    equipped: EquipSlot<WeaponId>,
    created_at: DateTime<Utc>,
}

impl Character {
    /// Create a new, unequipped character with a freshly allocated id.
    pub fn new(
        player_id: PlayerId,
        character_data_id: CharacterDataId,
        character_name: CharacterName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            player_id,
            character_id: CharacterId::generate(),
            character_data_id,
            character_name,
            equipped: EquipSlot::Empty,
            created_at: now,
        }
    }

    /// Rebuild a character from persisted parts.
    pub fn from_parts(
        player_id: PlayerId,
        character_id: CharacterId,
        character_data_id: CharacterDataId,
        character_name: CharacterName,
        equipped: EquipSlot<WeaponId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player_id,
            character_id,
            character_data_id,
            character_name,
            equipped,
            created_at,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn id(&self) -> &CharacterId {
        &self.character_id
    }

    pub fn character_data_id(&self) -> &CharacterDataId {
        &self.character_data_id
    }

    pub fn name(&self) -> &CharacterName {
        &self.character_name
    }

    pub fn equipped(&self) -> &EquipSlot<WeaponId> {
        &self.equipped
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sort_key(&self, schema: &KeySchema) -> String {
        schema.sort_key(EntityKind::Character, self.character_id.as_str())
    }
}
