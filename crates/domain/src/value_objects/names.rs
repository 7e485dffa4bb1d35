//! Validated name newtypes for inventory entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields (CharacterName, WeaponName)
const MAX_NAME_LENGTH: usize = 200;

fn validate_name(label: &str, name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{label} cannot be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            label, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Name given to characters created without an explicit one.
    pub const DEFAULT: &'static str = "test_character";

    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("Character name", name.into()).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CharacterName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

// ============================================================================
// WeaponName
// ============================================================================

/// A validated weapon name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeaponName(String);

impl WeaponName {
    /// Name given to weapons created without an explicit one.
    pub const DEFAULT: &'static str = "test_weapon";

    /// Create a new validated weapon name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than 200 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("Weapon name", name.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WeaponName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for WeaponName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WeaponName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<WeaponName> for String {
    fn from(name: WeaponName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_name_trims() {
        let name = CharacterName::new("  Aria  ").unwrap();
        assert_eq!(name.as_str(), "Aria");
    }

    #[test]
    fn character_name_rejects_empty() {
        assert!(CharacterName::new("   ").is_err());
    }

    #[test]
    fn weapon_name_rejects_too_long() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(WeaponName::new(long).is_err());
    }

    #[test]
    fn defaults_match_placeholder_names() {
        assert_eq!(CharacterName::default().as_str(), "test_character");
        assert_eq!(WeaponName::default().as_str(), "test_weapon");
    }

    #[test]
    fn serde_rejects_invalid_names() {
        let result: Result<WeaponName, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
