//! Application configuration

use std::env;

use armory_domain::{DomainError, KeySchema, KeySchemaConfig};

/// Invalid configuration, reported at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid key schema: {0}")]
    KeySchema(#[from] DomainError),
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Which [`InventoryStore`](crate::infrastructure::ports::InventoryStore) backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: String },
    Memory,
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,

    /// Inventory storage backend
    pub backend: StoreBackend,
    /// Table and field names, resolved once here
    pub key_schema: KeySchema,

    /// Read both entities back after a rejected equip to explain the conflict
    pub equip_conflict_diagnostics: bool,

    /// CORS allowed origins (comma-separated, or "*" for any). Unset disables CORS.
    pub cors_allowed_origins: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid("SERVER_PORT", &raw, e))?,
            None => 3000,
        };

        let backend = match var("INVENTORY_BACKEND").as_deref() {
            None | Some("sqlite") => StoreBackend::Sqlite {
                path: var("INVENTORY_DB").unwrap_or_else(|| "inventory.db".to_string()),
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "INVENTORY_BACKEND",
                    other,
                    "expected \"sqlite\" or \"memory\"",
                ))
            }
        };

        let mut schema_config = KeySchemaConfig::default();
        if let Some(table) = var("INVENTORY_TABLE") {
            schema_config.table_name = table;
        }
        let key_schema = KeySchema::resolve(schema_config)?;

        let equip_conflict_diagnostics = match var("EQUIP_CONFLICT_DIAGNOSTICS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::invalid("EQUIP_CONFLICT_DIAGNOSTICS", &raw, "expected a boolean")
            })?,
            None => true,
        };

        Ok(Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            backend,
            key_schema,
            equip_conflict_diagnostics,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 3000);
        assert_eq!(
            config.backend,
            StoreBackend::Sqlite {
                path: "inventory.db".to_string()
            }
        );
        assert_eq!(config.key_schema.table_name(), "Inventory");
        assert!(config.equip_conflict_diagnostics);
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = load(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.server_port, 8080);

        let config = load(&[("PORT", "8080"), ("SERVER_PORT", "9090")]).unwrap();
        assert_eq!(config.server_port, 9090);
    }

    #[test]
    fn memory_backend_and_custom_table() {
        let config = load(&[
            ("INVENTORY_BACKEND", "memory"),
            ("INVENTORY_TABLE", "PlayerInventory"),
            ("EQUIP_CONFLICT_DIAGNOSTICS", "off"),
        ])
        .unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.key_schema.table_name(), "PlayerInventory");
        assert!(!config.equip_conflict_diagnostics);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("SERVER_PORT", "http")]),
            Err(ConfigError::InvalidValue { name: "SERVER_PORT", .. })
        ));
        assert!(matches!(
            load(&[("INVENTORY_BACKEND", "dynamo")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("EQUIP_CONFLICT_DIAGNOSTICS", "maybe")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("INVENTORY_TABLE", "drop table;")]),
            Err(ConfigError::KeySchema(_))
        ));
    }
}
