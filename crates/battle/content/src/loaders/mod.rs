//! Loaders for RON content files.

mod actions;
mod combatants;
mod factory;

pub use actions::ActionCatalogLoader;
pub use combatants::{CombatantRegistry, CombatantTemplate};
pub use factory::ContentFactory;
