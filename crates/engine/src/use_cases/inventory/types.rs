//! Inventory operation result types.

use armory_domain::{
    Character, CharacterId, EquipDirection, EquipSlot, PlayerId, Weapon, WeaponId,
};
use serde::Serialize;

/// Result of a committed equip or unequip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipOutcome {
    pub player_id: PlayerId,
    pub character_id: CharacterId,
    pub weapon_id: WeaponId,
    pub direction: EquipDirection,
}

/// One side of the link as read back after a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum ObservedSlot {
    /// The entity does not exist.
    Missing,
    Empty,
    Holding(String),
}

impl<T: AsRef<str>> From<&EquipSlot<T>> for ObservedSlot {
    fn from(slot: &EquipSlot<T>) -> Self {
        match slot.holding() {
            None => Self::Empty,
            Some(id) => Self::Holding(id.as_ref().to_string()),
        }
    }
}

/// Equip state of both entities, as read back after a conflict.
///
/// Read separately from the failed transaction, so it may already be out of
/// date; it explains the rejection, it does not authorize a retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedEquipState {
    pub character_equipped: ObservedSlot,
    pub weapon_equipped_on: ObservedSlot,
}

impl ObservedEquipState {
    pub fn from_entities(character: Option<&Character>, weapon: Option<&Weapon>) -> Self {
        Self {
            character_equipped: character
                .map(|c| ObservedSlot::from(c.equipped()))
                .unwrap_or(ObservedSlot::Missing),
            weapon_equipped_on: weapon
                .map(|w| ObservedSlot::from(w.equipped_on()))
                .unwrap_or(ObservedSlot::Missing),
        }
    }
}
