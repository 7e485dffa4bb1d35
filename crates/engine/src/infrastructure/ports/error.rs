//! Error types for port operations.

use super::types::ItemKey;

/// Inventory store failures.
///
/// `Conflict` and `Unavailable` stay separate: the first means a
/// precondition protected the data and nothing was written, the second means
/// the store could not be reached or failed internally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A conditional update's expected value did not match the stored value.
    /// Names the first failing condition. No update in the batch was applied.
    #[error("Condition failed on {key} field {field}")]
    Conflict { key: ItemKey, field: String },

    /// Backend unreachable or failed internally - includes operation name for tracing.
    #[error("Store error in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// A stored record could not be decoded.
    #[error("Corrupt record {key}: {message}")]
    Corrupt { key: ItemKey, message: String },
}

impl StoreError {
    pub fn conflict(key: ItemKey, field: impl Into<String>) -> Self {
        Self::Conflict {
            key,
            field: field.into(),
        }
    }

    /// Create an Unavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            operation,
            message: message.to_string(),
        }
    }

    pub fn corrupt(key: ItemKey, message: impl ToString) -> Self {
        Self::Corrupt {
            key,
            message: message.to_string(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
