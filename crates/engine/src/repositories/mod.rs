//! Repository modules - Data access wrappers around port traits.
//!
//! Each repository wraps a port trait and provides the typed interface
//! use cases use to access persisted entities.

pub mod inventory;
mod records;

pub use inventory::Inventory;
