//! Set equip use case.
//!
//! Equips a weapon on a character, or unequips it, as one atomic two-item
//! conditional update. Both sides of the link flip together or not at all.

use std::sync::Arc;

use armory_domain::{CharacterId, EntityKind, EquipDirection, EquipPlan, PlayerId, WeaponId};

use crate::infrastructure::ports::{ConditionalUpdate, StoreError};
use crate::repositories::Inventory;

use super::error::InventoryError;
use super::types::{EquipOutcome, ObservedEquipState};

/// Equip coordinator.
///
/// Orchestrates: guard computation, one conditional batch, conflict reporting.
///
/// A rejected batch is never retried: a failed guard means the caller's view
/// of equip state was stale.
pub struct SetEquip {
    inventory: Arc<Inventory>,
    diagnose_conflicts: bool,
}

impl SetEquip {
    pub fn new(inventory: Arc<Inventory>, diagnose_conflicts: bool) -> Self {
        Self {
            inventory,
            diagnose_conflicts,
        }
    }

    /// Execute the set equip use case.
    ///
    /// # Returns
    /// * `Ok(EquipOutcome)` - Both fields were updated
    /// * `Err(InventoryError::Conflict)` - A guard failed; nothing was written
    /// * `Err(InventoryError::StorageUnavailable)` - Store failure; nothing was written
    ///   unless the failure hid a commit (e.g. a lost response)
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        character_id: &CharacterId,
        weapon_id: &WeaponId,
        direction: EquipDirection,
    ) -> Result<EquipOutcome, InventoryError> {
        let plan = EquipPlan::for_request(direction, character_id.clone(), weapon_id.clone());
        let updates = self.conditional_updates(player_id, &plan);

        match self.inventory.commit(updates).await {
            Ok(()) => {
                tracing::info!(
                    player_id = %player_id,
                    character_id = %character_id,
                    weapon_id = %weapon_id,
                    direction = %direction,
                    "Equip state committed"
                );
                Ok(EquipOutcome {
                    player_id: player_id.clone(),
                    character_id: character_id.clone(),
                    weapon_id: weapon_id.clone(),
                    direction,
                })
            }
            Err(StoreError::Conflict { key, field }) => {
                tracing::warn!(
                    player_id = %player_id,
                    character_id = %character_id,
                    weapon_id = %weapon_id,
                    direction = %direction,
                    key = %key,
                    field = %field,
                    "Equip rejected: precondition failed"
                );
                let observed = if self.diagnose_conflicts {
                    self.observe(player_id, character_id, weapon_id).await
                } else {
                    None
                };
                Err(InventoryError::Conflict {
                    key,
                    field,
                    observed,
                })
            }
            Err(e) => {
                tracing::error!(
                    player_id = %player_id,
                    character_id = %character_id,
                    weapon_id = %weapon_id,
                    direction = %direction,
                    error = %e,
                    "Equip failed: store error"
                );
                Err(InventoryError::StorageUnavailable(e))
            }
        }
    }

    /// Character update first, weapon update second.
    fn conditional_updates(&self, player_id: &PlayerId, plan: &EquipPlan) -> Vec<ConditionalUpdate> {
        let schema = self.inventory.schema();
        vec![
            ConditionalUpdate {
                key: self.inventory.key(
                    player_id,
                    EntityKind::Character,
                    plan.character_id.as_str(),
                ),
                field: schema.equip_field(EntityKind::Character).to_string(),
                expected: plan.character.expected.as_stored().to_string(),
                new: plan.character.new.as_stored().to_string(),
            },
            ConditionalUpdate {
                key: self
                    .inventory
                    .key(player_id, EntityKind::Weapon, plan.weapon_id.as_str()),
                field: schema.equip_field(EntityKind::Weapon).to_string(),
                expected: plan.weapon.expected.as_stored().to_string(),
                new: plan.weapon.new.as_stored().to_string(),
            },
        ]
    }

    /// Diagnostic read after a rejection. Failures only cost the detail.
    async fn observe(
        &self,
        player_id: &PlayerId,
        character_id: &CharacterId,
        weapon_id: &WeaponId,
    ) -> Option<ObservedEquipState> {
        let character = self.inventory.get_character(player_id, character_id).await;
        let weapon = self.inventory.get_weapon(player_id, weapon_id).await;

        match (character, weapon) {
            (Ok(character), Ok(weapon)) => Some(ObservedEquipState::from_entities(
                character.as_ref(),
                weapon.as_ref(),
            )),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(
                    player_id = %player_id,
                    error = %e,
                    "Could not read equip state after conflict"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{Attributes, ItemKey, MockInventoryStore, StoredItem};
    use crate::use_cases::inventory::types::ObservedSlot;
    use armory_domain::KeySchema;
    use serde_json::json;

    fn ids() -> (PlayerId, CharacterId, WeaponId) {
        (
            PlayerId::new("p1").unwrap(),
            CharacterId::new("c1").unwrap(),
            WeaponId::new("w1").unwrap(),
        )
    }

    fn use_case(store: MockInventoryStore, diagnose: bool) -> SetEquip {
        let inventory = Arc::new(Inventory::new(
            Arc::new(store),
            Arc::new(KeySchema::default()),
        ));
        SetEquip::new(inventory, diagnose)
    }

    fn expected_batch(direction: EquipDirection) -> Vec<ConditionalUpdate> {
        let (character, weapon) = match direction {
            EquipDirection::Equip => (("none", "w1"), ("none", "c1")),
            EquipDirection::Unequip => (("w1", "none"), ("c1", "none")),
        };
        vec![
            ConditionalUpdate {
                key: ItemKey::new("p1", "character_c1"),
                field: "equipped".to_string(),
                expected: character.0.to_string(),
                new: character.1.to_string(),
            },
            ConditionalUpdate {
                key: ItemKey::new("p1", "weapon_w1"),
                field: "equipped_on".to_string(),
                expected: weapon.0.to_string(),
                new: weapon.1.to_string(),
            },
        ]
    }

    fn record(sort: &str, fields: &[(&str, &str)]) -> StoredItem {
        let attributes: Attributes = fields
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect();
        StoredItem {
            key: ItemKey::new("p1", sort),
            attributes,
        }
    }

    #[tokio::test]
    async fn equip_submits_one_batch_guarding_empty_slots() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store
            .expect_atomic_update()
            .withf(|updates| *updates == expected_batch(EquipDirection::Equip))
            .times(1)
            .returning(|_| Ok(()));

        let outcome = use_case(store, true)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Equip)
            .await
            .unwrap();

        assert_eq!(outcome.direction, EquipDirection::Equip);
        assert_eq!(outcome.character_id, character_id);
        assert_eq!(outcome.weapon_id, weapon_id);
    }

    #[tokio::test]
    async fn unequip_guards_on_mutual_links() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store
            .expect_atomic_update()
            .withf(|updates| *updates == expected_batch(EquipDirection::Unequip))
            .times(1)
            .returning(|_| Ok(()));

        let result = use_case(store, true)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Unequip)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn conflict_is_not_retried() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store.expect_atomic_update().times(1).returning(|_| {
            Err(StoreError::conflict(
                ItemKey::new("p1", "weapon_w1"),
                "equipped_on",
            ))
        });
        // No get expectations: diagnostics are off, so any read would panic

        let err = use_case(store, false)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Equip)
            .await
            .unwrap_err();

        match err {
            InventoryError::Conflict {
                key,
                field,
                observed,
            } => {
                assert_eq!(key, ItemKey::new("p1", "weapon_w1"));
                assert_eq!(field, "equipped_on");
                assert!(observed.is_none());
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_reports_observed_state_when_diagnosing() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store.expect_atomic_update().times(1).returning(|_| {
            Err(StoreError::conflict(
                ItemKey::new("p1", "weapon_w1"),
                "equipped_on",
            ))
        });
        store.expect_get().times(2).returning(|key| {
            if key.sort == "character_c1" {
                Ok(Some(record(
                    "character_c1",
                    &[
                        ("character_data_id", "knight"),
                        ("character_name", "Knight"),
                        ("equipped", "none"),
                    ],
                )))
            } else {
                Ok(Some(record(
                    "weapon_w1",
                    &[
                        ("weapon_data_id", "sword"),
                        ("weapon_name", "Sword"),
                        ("equipped_on", "c2"),
                    ],
                )))
            }
        });
        store.expect_put().never();

        let err = use_case(store, true)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Equip)
            .await
            .unwrap_err();

        match err {
            InventoryError::Conflict { observed, .. } => {
                assert_eq!(
                    observed,
                    Some(ObservedEquipState {
                        character_equipped: ObservedSlot::Empty,
                        weapon_equipped_on: ObservedSlot::Holding("c2".to_string()),
                    })
                );
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_on_missing_entity_reports_missing() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store.expect_atomic_update().times(1).returning(|_| {
            Err(StoreError::conflict(
                ItemKey::new("p1", "character_c1"),
                "equipped",
            ))
        });
        store.expect_get().times(2).returning(|_| Ok(None));

        let err = use_case(store, true)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Unequip)
            .await
            .unwrap_err();

        match err {
            InventoryError::Conflict { observed, .. } => {
                let observed = observed.expect("observed state");
                assert_eq!(observed.character_equipped, ObservedSlot::Missing);
                assert_eq!(observed.weapon_equipped_on, ObservedSlot::Missing);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_diagnostic_read_still_reports_conflict() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store.expect_atomic_update().times(1).returning(|_| {
            Err(StoreError::conflict(
                ItemKey::new("p1", "character_c1"),
                "equipped",
            ))
        });
        store
            .expect_get()
            .returning(|_| Err(StoreError::unavailable("get", "connection reset")));

        let err = use_case(store, true)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Equip)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Conflict { observed: None, .. }
        ));
    }

    #[tokio::test]
    async fn store_failure_propagates_as_unavailable() {
        let (player_id, character_id, weapon_id) = ids();
        let mut store = MockInventoryStore::new();
        store
            .expect_atomic_update()
            .times(1)
            .returning(|_| Err(StoreError::unavailable("atomic_update", "database is locked")));

        let err = use_case(store, true)
            .execute(&player_id, &character_id, &weapon_id, EquipDirection::Equip)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InventoryError::StorageUnavailable(StoreError::Unavailable { .. })
        ));
    }
}
