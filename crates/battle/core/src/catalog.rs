//! Action catalog.
//!
//! A read-only table of action definitions keyed by `(origin, name)`. The
//! catalog has no operations beyond lookup; a miss is a caller or
//! configuration bug, surfaced as [`crate::engine::EngineError::UnknownAction`]
//! by the engine rather than recovered from here.

use crate::action::Action;
use crate::combatant::CombatantId;

/// Immutable table of the moves available to each side.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    entries: Vec<Action>,
}

impl ActionCatalog {
    pub fn new(entries: Vec<Action>) -> Self {
        Self { entries }
    }

    /// Looks up an action by origin and name.
    pub fn get(&self, origin: CombatantId, name: &str) -> Option<&Action> {
        self.entries
            .iter()
            .find(|action| action.origin == origin && action.name == name)
    }

    /// All moves available to `origin`, in catalog order. Used by
    /// presentation layers to list a combatant's options.
    pub fn actions_for(&self, origin: CombatantId) -> impl Iterator<Item = &Action> {
        self.entries
            .iter()
            .filter(move |action| action.origin == origin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
