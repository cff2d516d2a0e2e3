//! Battle worker that owns the authoritative [`battle_core::Battle`].
//!
//! Receives commands from [`crate::api::BattleHandle`] and expired timers
//! from the [`ResolutionScheduler`], drives them through
//! [`battle_core::CombatEngine`], and publishes a snapshot-carrying event
//! after every mutation. Commands and resolutions are handled strictly one
//! at a time; the timers are the only suspension point, so engine
//! operations never interleave.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error};

use battle_core::{
    ActionCatalog, Battle, BattleSnapshot, CombatEngine, CombatantId, EngineError,
};

use super::scheduler::{Resolution, ResolutionScheduler};
use crate::api::errors::Result;
use crate::api::events::BattleEvent;

/// Commands that can be sent to the battle worker.
pub(crate) enum Command {
    /// Validate, charge, and enqueue an action by catalog name.
    RequestAction {
        combatant: CombatantId,
        name: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Withdraw a queued (non-head) action and refund its cost.
    WithdrawAction {
        combatant: CombatantId,
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Read the current battle state.
    QuerySnapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
}

/// Background task that processes battle commands and expired timers.
pub(crate) struct BattleWorker {
    battle: Battle,
    catalog: ActionCatalog,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
    scheduler: ResolutionScheduler,
    resolution_rx: mpsc::Receiver<Resolution>,
}

impl BattleWorker {
    pub fn new(
        battle: Battle,
        catalog: ActionCatalog,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        let (scheduler, resolution_rx) = ResolutionScheduler::new();
        Self {
            battle,
            catalog,
            command_rx,
            event_tx,
            scheduler,
            resolution_rx,
        }
    }

    /// Main worker loop. Exits when every [`crate::api::BattleHandle`] has
    /// been dropped, cancelling outstanding timers on the way out.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(resolution) = self.resolution_rx.recv() => {
                    self.handle_resolution(resolution);
                }
            }
        }
        self.scheduler.cancel_all();
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::RequestAction {
                combatant,
                name,
                reply,
            } => {
                let result = self.handle_request(combatant, &name);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "RequestAction reply channel closed (caller dropped)");
                }
            }
            Command::WithdrawAction {
                combatant,
                index,
                reply,
            } => {
                let result = self.handle_withdraw(combatant, index);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "WithdrawAction reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.battle.snapshot()).is_err() {
                    debug!(target: "runtime::worker", "QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_request(&mut self, combatant: CombatantId, name: &str) -> Result<()> {
        let outcome =
            CombatEngine::new(&mut self.battle).request_action(&self.catalog, combatant, name)?;

        if let Some(timer) = outcome.schedule {
            self.scheduler.schedule(combatant, timer);
        }

        debug!(
            target: "runtime::worker",
            %combatant,
            action = %outcome.queued.name,
            "action queued"
        );
        self.publish(BattleEvent::ActionQueued {
            combatant,
            action: outcome.queued,
            snapshot: Box::new(self.battle.snapshot()),
        });

        Ok(())
    }

    fn handle_withdraw(&mut self, combatant: CombatantId, index: usize) -> Result<()> {
        let action = CombatEngine::new(&mut self.battle).withdraw_action(combatant, index)?;

        debug!(
            target: "runtime::worker",
            %combatant,
            action = %action.name,
            index,
            "action withdrawn, cost refunded"
        );
        self.publish(BattleEvent::ActionWithdrawn {
            combatant,
            action,
            snapshot: Box::new(self.battle.snapshot()),
        });

        Ok(())
    }

    fn handle_resolution(&mut self, resolution: Resolution) {
        self.scheduler.acknowledge(resolution.combatant);

        match CombatEngine::new(&mut self.battle).resolve_head(resolution.combatant) {
            Ok(outcome) => {
                debug_assert_eq!(
                    outcome.resolved.name, resolution.action.name,
                    "resolved head differs from the action the timer was started for"
                );
                debug!(
                    target: "runtime::worker",
                    combatant = %resolution.combatant,
                    action = %outcome.resolved.name,
                    damage = outcome.damage,
                    target_health = outcome.target_health,
                    "action resolved"
                );

                let damage = outcome.damage;
                self.publish(BattleEvent::ActionResolved {
                    action: outcome.resolved,
                    damage,
                    snapshot: Box::new(self.battle.snapshot()),
                });

                if let Some(timer) = outcome.schedule {
                    self.scheduler.schedule(resolution.combatant, timer);
                }

                if let Some(victor) = outcome.victor {
                    // No further requests are accepted; outstanding timers
                    // on the losing side are cancelled rather than left to
                    // fire into a concluded battle.
                    self.scheduler.cancel_all();
                    self.publish(BattleEvent::BattleConcluded {
                        victor: Some(victor),
                        snapshot: Box::new(self.battle.snapshot()),
                    });
                }
            }
            // A timer that fires after conclusion is dropped harmlessly.
            Err(EngineError::BattleConcluded) => {
                debug!(
                    target: "runtime::worker",
                    combatant = %resolution.combatant,
                    action = %resolution.action.name,
                    "timer fired into a concluded battle, dropped"
                );
            }
            Err(err) => {
                error!(
                    target: "runtime::worker",
                    combatant = %resolution.combatant,
                    error = %err,
                    "resolution failed"
                );
            }
        }
    }

    /// Publishes an event. A send error only means no renderer is
    /// subscribed right now, which is fine.
    fn publish(&self, event: BattleEvent) {
        let _ = self.event_tx.send(event);
    }
}
