//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Inventory storage (in-memory for tests and demos, SQLite for deployments)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Storage Port
// =============================================================================
pub use repos::InventoryStore;
pub use types::{Attributes, ConditionalUpdate, ItemKey, StoredItem};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockInventoryStore;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::StoreError;
