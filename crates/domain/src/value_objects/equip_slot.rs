//! Equip slot value object.
//!
//! A slot is either empty or holds the local id of the entity on the other
//! side of the equip relationship. Persisted as the sentinel `"none"` or the
//! id text, which is the exact value the store's preconditions compare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::NONE_SENTINEL;

/// One side of the character/weapon link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EquipSlot<T> {
    #[default]
    Empty,
    Holding(T),
}

impl<T> EquipSlot<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn holding(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Holding(id) => Some(id),
        }
    }

    /// Whether this slot currently holds exactly `id`.
    pub fn holds(&self, id: &T) -> bool
    where
        T: PartialEq,
    {
        self.holding() == Some(id)
    }
}

impl<T: AsRef<str>> EquipSlot<T> {
    /// The stored representation.
    pub fn as_stored(&self) -> &str {
        match self {
            Self::Empty => NONE_SENTINEL,
            Self::Holding(id) => id.as_ref(),
        }
    }
}

impl<T> EquipSlot<T>
where
    T: FromStr<Err = DomainError>,
{
    /// Parse a stored slot value.
    pub fn parse_stored(raw: &str) -> Result<Self, DomainError> {
        if raw == NONE_SENTINEL {
            return Ok(Self::Empty);
        }
        raw.parse::<T>()
            .map(Self::Holding)
            .map_err(|e| DomainError::parse(format!("Invalid equip slot value {raw:?}: {e}")))
    }
}

impl<T: AsRef<str>> fmt::Display for EquipSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_stored())
    }
}

impl<T: AsRef<str>> Serialize for EquipSlot<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_stored())
    }
}

impl<'de, T> Deserialize<'de> for EquipSlot<T>
where
    T: FromStr<Err = DomainError>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_stored(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::WeaponId;

    #[test]
    fn empty_slot_stores_sentinel() {
        let slot: EquipSlot<WeaponId> = EquipSlot::Empty;
        assert_eq!(slot.as_stored(), "none");
    }

    #[test]
    fn holding_slot_stores_id() {
        let slot = EquipSlot::Holding(WeaponId::new("w1").unwrap());
        assert_eq!(slot.as_stored(), "w1");
        assert!(slot.holds(&WeaponId::new("w1").unwrap()));
        assert!(!slot.holds(&WeaponId::new("w2").unwrap()));
    }

    #[test]
    fn parse_stored_round_values() {
        assert_eq!(
            EquipSlot::<WeaponId>::parse_stored("none").unwrap(),
            EquipSlot::Empty
        );
        assert_eq!(
            EquipSlot::<WeaponId>::parse_stored("w9").unwrap(),
            EquipSlot::Holding(WeaponId::new("w9").unwrap())
        );
    }

    #[test]
    fn parse_stored_rejects_garbage() {
        assert!(EquipSlot::<WeaponId>::parse_stored("").is_err());
        assert!(EquipSlot::<WeaponId>::parse_stored("a b").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let slot = EquipSlot::Holding(WeaponId::new("axe").unwrap());
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"axe\"");
        let empty: EquipSlot<WeaponId> = serde_json::from_str("\"none\"").unwrap();
        assert!(empty.is_empty());
    }
}
