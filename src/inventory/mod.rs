//! Word block inventory.
//!
//! - `WordBlockDefinition`: a value the player can take blocks of
//! - `FilterGroup`: an inventory tab
//! - `InventoryCatalog`: what is unlocked right now, and which tab is open

mod catalog;
mod definition;

pub use catalog::InventoryCatalog;
pub use definition::{FilterGroup, WordBlockDefinition};
