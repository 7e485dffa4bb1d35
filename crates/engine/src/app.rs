//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::{AppConfig, StoreBackend},
    memory_store::InMemoryInventoryStore,
    ports::{ClockPort, InventoryStore, StoreError},
    sqlite_store::SqliteInventoryStore,
};
use crate::repositories::Inventory;
use crate::use_cases;

use armory_domain::KeySchema;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub inventory: use_cases::InventoryUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        store: Arc<dyn InventoryStore>,
        key_schema: KeySchema,
        clock: Arc<dyn ClockPort>,
        equip_conflict_diagnostics: bool,
    ) -> Self {
        let inventory = Arc::new(Inventory::new(store, Arc::new(key_schema)));

        Self {
            use_cases: UseCases {
                inventory: use_cases::InventoryUseCases::from_inventory(
                    inventory,
                    clock,
                    equip_conflict_diagnostics,
                ),
            },
        }
    }

    /// Open the configured store and wire the application around it.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn InventoryStore> = match &config.backend {
            StoreBackend::Sqlite { path } => {
                tracing::info!(
                    path = %path,
                    table = %config.key_schema.table_name(),
                    "Opening SQLite inventory store"
                );
                Arc::new(SqliteInventoryStore::new(path, config.key_schema.table_name()).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory inventory store; contents are lost on restart");
                Arc::new(InMemoryInventoryStore::new())
            }
        };

        Ok(Self::new(
            store,
            config.key_schema.clone(),
            Arc::new(SystemClock::new()),
            config.equip_conflict_diagnostics,
        ))
    }
}
