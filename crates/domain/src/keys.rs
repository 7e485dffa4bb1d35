//! Key schema: how entities map onto the `(partition, sort)` key space.
//!
//! All of a player's entities share one partition. The sort key is a type
//! prefix followed by the entity-local id, so a prefix query on the sort key
//! selects one entity kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The kinds of entity stored in a player's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Weapon,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Character, EntityKind::Weapon];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Character => "Character",
            Self::Weapon => "Weapon",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw key-schema settings, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySchemaConfig {
    pub table_name: String,
    pub partition_key_field: String,
    pub sort_key_field: String,
    pub character_prefix: String,
    pub weapon_prefix: String,
    pub character_equip_field: String,
    pub weapon_equip_field: String,
}

impl Default for KeySchemaConfig {
    fn default() -> Self {
        Self {
            table_name: "Inventory".to_string(),
            partition_key_field: "player_id".to_string(),
            sort_key_field: "sk".to_string(),
            character_prefix: "character_".to_string(),
            weapon_prefix: "weapon_".to_string(),
            character_equip_field: "equipped".to_string(),
            weapon_equip_field: "equipped_on".to_string(),
        }
    }
}

/// Validated key schema, resolved once at startup and shared read-only.
///
/// # Invariants
///
/// - Every field name is a non-empty ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`)
/// - Field names are pairwise distinct
/// - Neither sort-key prefix is a prefix of the other, so prefix queries
///   never mix kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    config: KeySchemaConfig,
}

impl KeySchema {
    pub fn resolve(config: KeySchemaConfig) -> Result<Self, DomainError> {
        let fields = [
            ("table_name", config.table_name.as_str()),
            ("partition_key_field", config.partition_key_field.as_str()),
            ("sort_key_field", config.sort_key_field.as_str()),
            ("character_equip_field", config.character_equip_field.as_str()),
            ("weapon_equip_field", config.weapon_equip_field.as_str()),
        ];
        for (label, value) in fields {
            if !is_identifier(value) {
                return Err(DomainError::validation(format!(
                    "Key schema {label} must be an ASCII identifier, got {value:?}"
                )));
            }
        }

        let attribute_fields = &fields[1..];
        for (i, (label_a, a)) in attribute_fields.iter().enumerate() {
            for (label_b, b) in &attribute_fields[i + 1..] {
                if a == b {
                    return Err(DomainError::validation(format!(
                        "Key schema {label_a} and {label_b} must differ (both {a:?})"
                    )));
                }
            }
        }

        let (c, w) = (&config.character_prefix, &config.weapon_prefix);
        for prefix in [c, w] {
            if prefix.is_empty() || !prefix.is_ascii() {
                return Err(DomainError::validation(format!(
                    "Sort key prefix must be non-empty ASCII, got {prefix:?}"
                )));
            }
        }
        if c.starts_with(w.as_str()) || w.starts_with(c.as_str()) {
            return Err(DomainError::validation(format!(
                "Sort key prefixes {c:?} and {w:?} overlap"
            )));
        }

        Ok(Self { config })
    }

    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    pub fn partition_key_field(&self) -> &str {
        &self.config.partition_key_field
    }

    pub fn sort_key_field(&self) -> &str {
        &self.config.sort_key_field
    }

    pub fn prefix(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Character => &self.config.character_prefix,
            EntityKind::Weapon => &self.config.weapon_prefix,
        }
    }

    /// Name of the field holding the other side of the equip link.
    pub fn equip_field(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Character => &self.config.character_equip_field,
            EntityKind::Weapon => &self.config.weapon_equip_field,
        }
    }

    /// Shared key construction for every entity kind.
    pub fn sort_key(&self, kind: EntityKind, local_id: &str) -> String {
        let prefix = self.prefix(kind);
        let mut key = String::with_capacity(prefix.len() + local_id.len());
        key.push_str(prefix);
        key.push_str(local_id);
        key
    }

    /// Split a stored sort key into its kind and local id.
    pub fn split_sort_key<'a>(&self, sort_key: &'a str) -> Option<(EntityKind, &'a str)> {
        EntityKind::ALL.into_iter().find_map(|kind| {
            sort_key
                .strip_prefix(self.prefix(kind))
                .map(|local_id| (kind, local_id))
        })
    }
}

impl Default for KeySchema {
    fn default() -> Self {
        Self {
            config: KeySchemaConfig::default(),
        }
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_resolves() {
        let schema = KeySchema::resolve(KeySchemaConfig::default()).unwrap();
        assert_eq!(schema, KeySchema::default());
        assert_eq!(schema.table_name(), "Inventory");
        assert_eq!(schema.equip_field(EntityKind::Character), "equipped");
        assert_eq!(schema.equip_field(EntityKind::Weapon), "equipped_on");
    }

    #[test]
    fn sort_key_concatenates_prefix_and_id() {
        let schema = KeySchema::default();
        assert_eq!(schema.sort_key(EntityKind::Character, "c1"), "character_c1");
        assert_eq!(schema.sort_key(EntityKind::Weapon, "w1"), "weapon_w1");
    }

    #[test]
    fn split_sort_key_recovers_kind() {
        let schema = KeySchema::default();
        assert_eq!(
            schema.split_sort_key("weapon_abc"),
            Some((EntityKind::Weapon, "abc"))
        );
        assert_eq!(
            schema.split_sort_key("character_x-1"),
            Some((EntityKind::Character, "x-1"))
        );
        assert_eq!(schema.split_sort_key("armor_1"), None);
    }

    #[test]
    fn rejects_overlapping_prefixes() {
        let config = KeySchemaConfig {
            character_prefix: "c".to_string(),
            weapon_prefix: "c_weapon_".to_string(),
            ..KeySchemaConfig::default()
        };
        assert!(KeySchema::resolve(config).is_err());
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let config = KeySchemaConfig {
            weapon_equip_field: "equipped".to_string(),
            ..KeySchemaConfig::default()
        };
        assert!(KeySchema::resolve(config).is_err());
    }

    #[test]
    fn rejects_non_identifier_fields() {
        let config = KeySchemaConfig {
            character_equip_field: "equipped.on".to_string(),
            ..KeySchemaConfig::default()
        };
        assert!(KeySchema::resolve(config).is_err());

        let config = KeySchemaConfig {
            table_name: "".to_string(),
            ..KeySchemaConfig::default()
        };
        assert!(KeySchema::resolve(config).is_err());
    }
}
