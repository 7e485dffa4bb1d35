//! Identifier newtypes.
//!
//! Identifiers arrive from callers as path segments, so they are validated
//! strings rather than UUIDs. Freshly allocated local ids use UUID v4 text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored value of an empty equip slot. No identifier may take this value.
pub const NONE_SENTINEL: &str = "none";

/// Maximum identifier length in bytes.
const MAX_ID_LENGTH: usize = 128;

fn validate_id(kind: &str, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_id(format!("{kind} cannot be empty")));
    }
    if trimmed.len() > MAX_ID_LENGTH {
        return Err(DomainError::invalid_id(format!(
            "{kind} cannot exceed {MAX_ID_LENGTH} bytes"
        )));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(DomainError::invalid_id(format!(
            "{kind} contains invalid character {bad:?}"
        )));
    }
    if trimmed == NONE_SENTINEL {
        return Err(DomainError::invalid_id(format!(
            "{kind} cannot be the reserved value \"{NONE_SENTINEL}\""
        )));
    }
    Ok(trimmed.to_string())
}

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a caller-supplied identifier.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
                validate_id($label, raw.as_ref()).map(Self)
            }

            /// Allocate a fresh identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Owner
define_id!(PlayerId, "Player ID");

// Entity-local ids (the part after the sort-key prefix)
define_id!(CharacterId, "Character ID");
define_id!(WeaponId, "Weapon ID");

// Master-data references, opaque to this crate
define_id!(CharacterDataId, "Character data ID");
define_id!(WeaponDataId, "Weapon data ID");
