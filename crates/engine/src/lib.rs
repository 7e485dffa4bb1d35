//! Armory Engine library.
//!
//! Player inventories of characters and weapons, with an atomic equip
//! transaction that keeps both sides of the character/weapon link in step.
//!
//! ## Structure
//!
//! - `repositories/` - Typed access to the inventory store
//! - `use_cases/` - Queries, creation and the equip coordinator
//! - `infrastructure/` - Port traits, store adapters, configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
