//! Inventory use cases.
//!
//! Handles inventory queries, entity creation and the equip transaction.

use std::sync::Arc;

mod create_character;
mod create_weapon;
pub mod error;
mod queries;
mod request;
mod set_equip;
pub mod types;


pub use create_character::CreateCharacter;
pub use create_weapon::CreateWeapon;
pub use error::InventoryError;
pub use queries::InventoryOps;
pub use request::{InventoryRequest, InventoryResponse};
pub use set_equip::SetEquip;
pub use types::{EquipOutcome, ObservedEquipState, ObservedSlot};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::Inventory;

/// Container for inventory use cases.
pub struct InventoryUseCases {
    pub ops: Arc<InventoryOps>,
    pub create_character: Arc<CreateCharacter>,
    pub create_weapon: Arc<CreateWeapon>,
    pub set_equip: Arc<SetEquip>,
}

impl InventoryUseCases {
    pub fn new(
        ops: Arc<InventoryOps>,
        create_character: Arc<CreateCharacter>,
        create_weapon: Arc<CreateWeapon>,
        set_equip: Arc<SetEquip>,
    ) -> Self {
        Self {
            ops,
            create_character,
            create_weapon,
            set_equip,
        }
    }

    /// Wire every inventory use case over one repository.
    pub fn from_inventory(
        inventory: Arc<Inventory>,
        clock: Arc<dyn ClockPort>,
        diagnose_conflicts: bool,
    ) -> Self {
        Self::new(
            Arc::new(InventoryOps::new(inventory.clone())),
            Arc::new(CreateCharacter::new(inventory.clone(), clock.clone())),
            Arc::new(CreateWeapon::new(inventory.clone(), clock)),
            Arc::new(SetEquip::new(inventory, diagnose_conflicts)),
        )
    }

    /// Dispatch a request descriptor to the matching use case.
    pub async fn handle(
        &self,
        request: InventoryRequest,
    ) -> Result<InventoryResponse, InventoryError> {
        tracing::debug!(
            player_id = %request.player_id(),
            operation = request.operation(),
            "Handling inventory request"
        );

        match request {
            InventoryRequest::ListCharacters { player_id } => self
                .ops
                .list_characters(&player_id)
                .await
                .map(InventoryResponse::Characters),
            InventoryRequest::ListWeapons { player_id } => self
                .ops
                .list_weapons(&player_id)
                .await
                .map(InventoryResponse::Weapons),
            InventoryRequest::ListAll { player_id } => self
                .ops
                .list_all(&player_id)
                .await
                .map(InventoryResponse::Entities),
            InventoryRequest::GetCharacter {
                player_id,
                character_id,
            } => self
                .ops
                .get_character(&player_id, &character_id)
                .await
                .map(InventoryResponse::Character),
            InventoryRequest::GetWeapon {
                player_id,
                weapon_id,
            } => self
                .ops
                .get_weapon(&player_id, &weapon_id)
                .await
                .map(InventoryResponse::Weapon),
            InventoryRequest::CreateCharacter {
                player_id,
                character_data_id,
                name,
            } => self
                .create_character
                .execute(player_id, character_data_id, name)
                .await
                .map(InventoryResponse::Character),
            InventoryRequest::CreateWeapon {
                player_id,
                weapon_data_id,
                name,
            } => self
                .create_weapon
                .execute(player_id, weapon_data_id, name)
                .await
                .map(InventoryResponse::Weapon),
            InventoryRequest::SetEquip {
                player_id,
                character_id,
                weapon_id,
                direction,
            } => self
                .set_equip
                .execute(&player_id, &character_id, &weapon_id, direction)
                .await
                .map(InventoryResponse::Equip),
        }
    }
}
