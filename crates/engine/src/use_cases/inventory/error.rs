//! Inventory operation errors.

use armory_domain::{DomainError, EntityKind};

use crate::infrastructure::ports::{ItemKey, StoreError};

use super::types::ObservedEquipState;

/// Errors that can occur during inventory operations.
///
/// `Conflict` and `StorageUnavailable` are never merged: a conflict means the
/// caller's view of equip state was stale and nothing was written, while
/// storage trouble is transient and safe to retry with backoff.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// An atomic update's precondition failed.
    #[error("Conflict on {key} field {field}")]
    Conflict {
        key: ItemKey,
        field: String,
        /// State read back after the rejection, when diagnostics are enabled.
        observed: Option<ObservedEquipState>,
    },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(StoreError),
}

impl InventoryError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { key, field } => Self::Conflict {
                key,
                field,
                observed: None,
            },
            other => Self::StorageUnavailable(other),
        }
    }
}
