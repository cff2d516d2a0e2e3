//! Asynchronous abstraction for sourcing combatant intent.
//!
//! The engine treats both sides identically: whoever picks a combatant's
//! next move (human input, a scripted fixture, an AI policy) implements
//! [`ActionProvider`] and issues requests through the same contract.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use battle_core::{BattleSnapshot, CombatantId};

use super::errors::Result;

/// Trait for deciding a combatant's next action from a battle snapshot.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Returns the catalog name of the next action to request, or `None`
    /// when the policy has nothing to do right now.
    async fn provide_action(
        &self,
        combatant: CombatantId,
        snapshot: &BattleSnapshot,
    ) -> Result<Option<String>>;
}

/// Provider that never acts. Useful as a placeholder or fallback.
pub struct IdleProvider;

#[async_trait]
impl ActionProvider for IdleProvider {
    async fn provide_action(
        &self,
        _combatant: CombatantId,
        _snapshot: &BattleSnapshot,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Provider that replays a fixed sequence of action names, then goes idle.
/// Used by tests and demos to script one side of a battle.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<String>>,
}

impl ScriptedProvider {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            script: Mutex::new(names.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(
        &self,
        _combatant: CombatantId,
        _snapshot: &BattleSnapshot,
    ) -> Result<Option<String>> {
        let mut script = self.script.lock().expect("script mutex poisoned");
        Ok(script.pop_front())
    }
}
