//! Armory domain: player inventories of characters and weapons.
//!
//! Pure types and rules only. The one cross-entity invariant, that equip
//! links are mutual, is expressed here as [`EquipPlan`]; the engine turns a
//! plan into a single atomic conditional write.

extern crate self as armory_domain;

pub mod entities;
pub mod equip;
pub mod error;
pub mod ids;
pub mod keys;
pub mod value_objects;

pub use entities::{Character, InventoryEntity, Weapon};
pub use equip::{
    find_link_violations, EquipDirection, EquipPlan, LinkState, LinkViolation, SlotTransition,
};
pub use error::DomainError;
pub use ids::{CharacterDataId, CharacterId, PlayerId, WeaponDataId, WeaponId, NONE_SENTINEL};
pub use keys::{EntityKind, KeySchema, KeySchemaConfig};
pub use value_objects::{CharacterName, EquipSlot, WeaponName};
