//! Store-level record types.
//!
//! The store knows nothing about characters or weapons. It holds JSON
//! attribute maps under `(partition, sort)` keys.

use std::fmt;

use serde_json::{Map, Value};

/// Attribute map of one stored record.
pub type Attributes = Map<String, Value>;

/// Composite primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub partition: String,
    pub sort: String,
}

impl ItemKey {
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.partition, self.sort)
    }
}

/// One stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredItem {
    pub key: ItemKey,
    pub attributes: Attributes,
}

/// Set `field` to `new` on `key`, but only if it currently equals `expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalUpdate {
    pub key: ItemKey,
    pub field: String,
    pub expected: String,
    pub new: String,
}

impl ConditionalUpdate {
    /// Whether the stored attributes satisfy this update's condition.
    /// A missing field never matches.
    pub fn is_satisfied_by(&self, attributes: &Attributes) -> bool {
        matches!(attributes.get(&self.field), Some(Value::String(current)) if *current == self.expected)
    }
}
