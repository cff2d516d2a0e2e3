//! Error types surfaced by the combat engine.

use crate::combatant::CombatantId;

/// Errors returned by [`crate::engine::CombatEngine`] operations.
///
/// Every validation happens strictly before any mutation, so a returned
/// error never leaves combatant state partially applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The requested action costs more energy than the combatant has.
    /// Recoverable: the caller retries later or picks a cheaper action.
    #[error("insufficient resources: action requires {required} energy, {available} available")]
    InsufficientResources { required: u32, available: u32 },

    /// Attempt to withdraw the queue head (already timing, irrevocable) or
    /// an index past the end of the queue. Recoverable, no state change.
    #[error("invalid withdrawal: index {index} not withdrawable (queue length {queue_len})")]
    InvalidWithdrawal { index: usize, queue_len: usize },

    /// Catalog lookup miss. A caller or configuration bug: correct
    /// integrations only request names the catalog defines.
    #[error("unknown action '{name}' for {combatant}")]
    UnknownAction { combatant: CombatantId, name: String },

    /// The battle already reached its terminal state. Surfaced to the
    /// caller as a no-op.
    #[error("battle has concluded; no further actions are accepted")]
    BattleConcluded,
}
