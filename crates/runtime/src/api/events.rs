//! Events emitted during a battle for front-ends to observe.
//!
//! Every state-mutating operation publishes one event carrying a fresh
//! [`BattleSnapshot`], so an external renderer redraws from the event
//! stream alone and never touches battle state directly. The engine does
//! not render; it only makes its latest snapshot available here.

use battle_core::{Action, BattleSnapshot, CombatantId};

/// Events published by the battle worker.
#[derive(Debug, Clone)]
pub enum BattleEvent {
    /// An action was validated, charged, and appended to its owner's queue.
    ActionQueued {
        combatant: CombatantId,
        action: Action,
        snapshot: Box<BattleSnapshot>,
    },
    /// A queued (non-head) action was withdrawn and its cost refunded.
    ActionWithdrawn {
        combatant: CombatantId,
        action: Action,
        snapshot: Box<BattleSnapshot>,
    },
    /// A loading timer expired and the action's damage was applied.
    ActionResolved {
        action: Action,
        damage: u32,
        snapshot: Box<BattleSnapshot>,
    },
    /// A combatant's health reached zero or below; the battle is over.
    BattleConcluded {
        victor: Option<CombatantId>,
        snapshot: Box<BattleSnapshot>,
    },
}

impl BattleEvent {
    /// The snapshot taken immediately after the mutation this event reports.
    pub fn snapshot(&self) -> &BattleSnapshot {
        match self {
            BattleEvent::ActionQueued { snapshot, .. }
            | BattleEvent::ActionWithdrawn { snapshot, .. }
            | BattleEvent::ActionResolved { snapshot, .. }
            | BattleEvent::BattleConcluded { snapshot, .. } => snapshot,
        }
    }
}
