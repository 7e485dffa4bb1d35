//! Value objects - validated, immutable building blocks for entities.

mod equip_slot;
mod names;

pub use equip_slot::EquipSlot;
pub use names::{CharacterName, WeaponName};
