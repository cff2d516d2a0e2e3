//! Combat resolution engine.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`Battle`] state:
//! it validates resource costs, charges and refunds energy, maintains each
//! combatant's FIFO queue, and applies damage when a loading timer expires.
//! Nothing else mutates a combatant.
//!
//! The engine is pure and synchronous. Operations that need a timer return
//! a [`TimerRequest`] directive; the runtime's scheduler executes it and
//! calls [`CombatEngine::resolve_head`] when the delay elapses. Per queue
//! head the states are: idle (queue empty) → queued (non-head positions) →
//! resolving (head, timer active) → idle or resolving again once resolution
//! advances the queue.

mod errors;

pub use errors::EngineError;

use std::time::Duration;

use crate::action::Action;
use crate::battle::{Battle, BattlePhase};
use crate::catalog::ActionCatalog;
use crate::combat::compute_damage;
use crate::combatant::CombatantId;

/// Directive for the scheduler: start a timer for `action` that fires after
/// `delay`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub action: Action,
    pub delay: Duration,
}

impl TimerRequest {
    fn for_head(action: &Action) -> Self {
        Self {
            action: action.clone(),
            delay: action.loading(),
        }
    }
}

/// Outcome of a successful [`CombatEngine::request_action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOutcome {
    /// The catalog row that was charged and enqueued.
    pub queued: Action,
    /// `Some` when the new entry became the queue head and must start
    /// timing; `None` when it sits behind an in-flight head.
    pub schedule: Option<TimerRequest>,
}

/// Outcome of a successful [`CombatEngine::resolve_head`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The action that just resolved.
    pub resolved: Action,
    /// Damage dealt to the target, per the formula for the action's kind.
    pub damage: u32,
    /// Target health after the damage was applied.
    pub target_health: i64,
    /// Timer for the next queue head, when one is waiting and the battle
    /// is still active.
    pub schedule: Option<TimerRequest>,
    /// `Some` when this resolution dropped the target to zero or below.
    pub victor: Option<CombatantId>,
}

/// Facade over a [`Battle`]: the single authority for combatant mutation.
pub struct CombatEngine<'a> {
    battle: &'a mut Battle,
}

impl<'a> CombatEngine<'a> {
    pub fn new(battle: &'a mut Battle) -> Self {
        Self { battle }
    }

    /// Validates and enqueues an action for `combatant`.
    ///
    /// The cost is charged on enqueue and refunded only by withdrawal.
    /// Affordability is re-validated here even if the caller checked
    /// earlier: this is the sole gate against overspending, and caller
    /// checks may be stale by the time the request arrives.
    pub fn request_action(
        &mut self,
        catalog: &ActionCatalog,
        combatant: CombatantId,
        name: &str,
    ) -> Result<RequestOutcome, EngineError> {
        if !self.battle.is_active() {
            return Err(EngineError::BattleConcluded);
        }

        let action = catalog
            .get(combatant, name)
            .ok_or_else(|| EngineError::UnknownAction {
                combatant,
                name: name.to_owned(),
            })?
            .clone();

        let fighter = self.battle.combatant_mut(combatant);
        if !fighter.can_afford(action.cost) {
            return Err(EngineError::InsufficientResources {
                required: action.cost,
                available: fighter.energy,
            });
        }

        fighter.spend_energy(action.cost);
        fighter.enqueue(action.clone());

        // Only the head of an otherwise idle queue starts timing; anything
        // behind an in-flight head waits its turn.
        let schedule = if fighter.in_flight() {
            None
        } else {
            fighter.set_in_flight(true);
            Some(TimerRequest::for_head(&action))
        };

        Ok(RequestOutcome {
            queued: action,
            schedule,
        })
    }

    /// Withdraws the queued action at `index`, refunding its cost in full.
    ///
    /// The head (`index == 0`) is irrevocable: once an action is timing it
    /// cannot be interrupted, so only later entries may be withdrawn. The
    /// head's timer is untouched by a successful withdrawal.
    pub fn withdraw_action(
        &mut self,
        combatant: CombatantId,
        index: usize,
    ) -> Result<Action, EngineError> {
        let fighter = self.battle.combatant_mut(combatant);

        if index == 0 || index >= fighter.queue_len() {
            return Err(EngineError::InvalidWithdrawal {
                index,
                queue_len: fighter.queue_len(),
            });
        }

        // Bounds were checked above, so removal cannot fail.
        let action = fighter
            .remove_queued(index)
            .expect("withdrawal index validated against queue length");
        fighter.restore_energy(action.cost);

        Ok(action)
    }

    /// Resolves the in-flight head of `combatant`'s queue.
    ///
    /// Invoked by the scheduler when the head's loading timer expires:
    /// pops the head, applies its damage to the target, and either hands
    /// back a timer for the next head or leaves the combatant idle. A timer
    /// that fires into a concluded battle is rejected with
    /// [`EngineError::BattleConcluded`] so the caller can drop it harmlessly.
    pub fn resolve_head(&mut self, combatant: CombatantId) -> Result<ResolutionOutcome, EngineError> {
        if !self.battle.is_active() {
            return Err(EngineError::BattleConcluded);
        }

        let origin = self.battle.combatant_mut(combatant);
        origin.set_in_flight(false);
        let resolved = origin
            .pop_head()
            .expect("resolution fired for a combatant with an empty queue");

        let damage = compute_damage(
            &resolved,
            &self.battle.combatant(resolved.origin).attributes,
            &self.battle.combatant(resolved.target).attributes,
        );

        let target = self.battle.combatant_mut(resolved.target);
        target.apply_damage(damage);
        let target_health = target.health;
        let defeated = target.is_defeated();

        if defeated {
            self.battle.set_phase(BattlePhase::Concluded {
                victor: Some(combatant),
            });
        }

        // Advance the queue: the next head starts timing immediately, with
        // no delay beyond its own loading cost.
        let origin = self.battle.combatant_mut(combatant);
        let schedule = if defeated {
            None
        } else {
            origin.peek_head().map(TimerRequest::for_head)
        };
        if schedule.is_some() {
            origin.set_in_flight(true);
        }

        Ok(ResolutionOutcome {
            resolved,
            damage,
            target_health,
            schedule,
            victor: defeated.then_some(combatant),
        })
    }
}
