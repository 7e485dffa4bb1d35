//! Use cases - User story orchestration.
//!
//! Use cases orchestrate across repository modules to fulfill user stories.

pub mod inventory;

pub use inventory::InventoryUseCases;
