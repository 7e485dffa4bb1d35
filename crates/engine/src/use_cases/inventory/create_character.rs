//! Create character use case.
//!
//! Adds a new, unequipped character to a player's inventory.

use std::sync::Arc;

use armory_domain::{Character, CharacterDataId, CharacterName, PlayerId};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::Inventory;

use super::error::InventoryError;

/// Create character use case.
pub struct CreateCharacter {
    inventory: Arc<Inventory>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(inventory: Arc<Inventory>, clock: Arc<dyn ClockPort>) -> Self {
        Self { inventory, clock }
    }

    /// Execute the create character use case.
    ///
    /// # Arguments
    /// * `player_id` - Owner of the new character
    /// * `character_data_id` - Catalog template the character is built from
    /// * `name` - Display name; `test_character` when absent
    ///
    /// # Returns
    /// * `Ok(Character)` - The stored character, with its allocated id
    /// * `Err(InventoryError)` - Failed to store the character
    pub async fn execute(
        &self,
        player_id: PlayerId,
        character_data_id: CharacterDataId,
        name: Option<CharacterName>,
    ) -> Result<Character, InventoryError> {
        let character = Character::new(
            player_id,
            character_data_id,
            name.unwrap_or_default(),
            self.clock.now(),
        );

        self.inventory.save_character(&character).await?;

        tracing::info!(
            player_id = %character.player_id(),
            character_id = %character.id(),
            character_data_id = %character.character_data_id(),
            "Character created"
        );

        Ok(character)
    }
}
