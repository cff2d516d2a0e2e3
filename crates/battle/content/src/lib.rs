//! Data-driven battle content and loaders.
//!
//! This crate houses the static content a battle is assembled from and
//! provides loaders for the embedded RON data files:
//! - Action catalogs (move sets per side)
//! - Combatant stat templates
//!
//! Content is consumed by the runtime when building a battle and never
//! appears in battle state. All loaders deserialize directly into
//! battle-core types via serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActionCatalogLoader, CombatantRegistry, ContentFactory};
