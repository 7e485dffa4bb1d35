//! Transport-agnostic inventory request descriptor.
//!
//! A routing layer turns whatever it receives into an [`InventoryRequest`]
//! with validated ids, then hands it to `InventoryUseCases::handle`.

use armory_domain::{
    Character, CharacterDataId, CharacterId, CharacterName, EquipDirection, InventoryEntity,
    PlayerId, Weapon, WeaponDataId, WeaponId, WeaponName,
};
use serde::Serialize;

use super::types::EquipOutcome;

/// One inventory operation and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryRequest {
    ListCharacters {
        player_id: PlayerId,
    },
    ListWeapons {
        player_id: PlayerId,
    },
    ListAll {
        player_id: PlayerId,
    },
    GetCharacter {
        player_id: PlayerId,
        character_id: CharacterId,
    },
    GetWeapon {
        player_id: PlayerId,
        weapon_id: WeaponId,
    },
    CreateCharacter {
        player_id: PlayerId,
        character_data_id: CharacterDataId,
        name: Option<CharacterName>,
    },
    CreateWeapon {
        player_id: PlayerId,
        weapon_data_id: WeaponDataId,
        name: Option<WeaponName>,
    },
    SetEquip {
        player_id: PlayerId,
        character_id: CharacterId,
        weapon_id: WeaponId,
        direction: EquipDirection,
    },
}

impl InventoryRequest {
    pub fn player_id(&self) -> &PlayerId {
        match self {
            Self::ListCharacters { player_id }
            | Self::ListWeapons { player_id }
            | Self::ListAll { player_id }
            | Self::GetCharacter { player_id, .. }
            | Self::GetWeapon { player_id, .. }
            | Self::CreateCharacter { player_id, .. }
            | Self::CreateWeapon { player_id, .. }
            | Self::SetEquip { player_id, .. } => player_id,
        }
    }

    /// Short operation name for logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ListCharacters { .. } => "list_characters",
            Self::ListWeapons { .. } => "list_weapons",
            Self::ListAll { .. } => "list_all",
            Self::GetCharacter { .. } => "get_character",
            Self::GetWeapon { .. } => "get_weapon",
            Self::CreateCharacter { .. } => "create_character",
            Self::CreateWeapon { .. } => "create_weapon",
            Self::SetEquip { .. } => "set_equip",
        }
    }
}

/// Result of a handled [`InventoryRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InventoryResponse {
    Characters(Vec<Character>),
    Weapons(Vec<Weapon>),
    Entities(Vec<InventoryEntity>),
    Character(Character),
    Weapon(Weapon),
    Equip(EquipOutcome),
}
