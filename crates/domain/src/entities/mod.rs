//! Inventory entities.
//!
//! Characters and weapons are independent record types. They share key
//! construction through [`crate::KeySchema`], nothing else.

mod character;
mod weapon;

use serde::Serialize;

use crate::keys::EntityKind;
use crate::PlayerId;

pub use character::Character;
pub use weapon::Weapon;

/// Any entity in a player's inventory, as returned by mixed-kind reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryEntity {
    Character(Character),
    Weapon(Weapon),
}

impl InventoryEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Character(_) => EntityKind::Character,
            Self::Weapon(_) => EntityKind::Weapon,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        match self {
            Self::Character(c) => c.player_id(),
            Self::Weapon(w) => w.player_id(),
        }
    }

    pub fn into_character(self) -> Option<Character> {
        match self {
            Self::Character(c) => Some(c),
            Self::Weapon(_) => None,
        }
    }

    pub fn into_weapon(self) -> Option<Weapon> {
        match self {
            Self::Weapon(w) => Some(w),
            Self::Character(_) => None,
        }
    }
}

impl From<Character> for InventoryEntity {
    fn from(value: Character) -> Self {
        Self::Character(value)
    }
}

impl From<Weapon> for InventoryEntity {
    fn from(value: Weapon) -> Self {
        Self::Weapon(value)
    }
}
