//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate
//! so the worker and scheduler can stay internal.

pub mod errors;
pub mod events;
pub mod handle;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use events::BattleEvent;
pub use handle::BattleHandle;
pub use providers::{ActionProvider, IdleProvider, ScriptedProvider};
