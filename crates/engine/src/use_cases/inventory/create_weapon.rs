//! Create weapon use case.

use std::sync::Arc;

use armory_domain::{PlayerId, Weapon, WeaponDataId, WeaponName};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::Inventory;

use super::error::InventoryError;

/// Adds a new weapon, equipped on nobody, to a player's inventory.
pub struct CreateWeapon {
    inventory: Arc<Inventory>,
    clock: Arc<dyn ClockPort>,
}

impl CreateWeapon {
    pub fn new(inventory: Arc<Inventory>, clock: Arc<dyn ClockPort>) -> Self {
        Self { inventory, clock }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        weapon_data_id: WeaponDataId,
        name: Option<WeaponName>,
    ) -> Result<Weapon, InventoryError> {
        let weapon = Weapon::new(
            player_id,
            weapon_data_id,
            name.unwrap_or_default(),
            self.clock.now(),
        );

        self.inventory.save_weapon(&weapon).await?;

        tracing::info!(
            player_id = %weapon.player_id(),
            weapon_id = %weapon.id(),
            weapon_data_id = %weapon.weapon_data_id(),
            "Weapon created"
        );

        Ok(weapon)
    }
}
