//! Resolution scheduler: one loading timer per combatant.
//!
//! The scheduler owns the combatant → timer-task mapping and never inspects
//! battle state. Each timer is a spawned task that sleeps for the action's
//! loading delay, then sends a [`Resolution`] message back into the battle
//! worker's single event loop, so a timer firing never interleaves with
//! command handling.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use battle_core::{Action, CombatantId, TimerRequest};

/// Message sent when a loading timer expires. Carries the action the timer
/// was started for so the worker can cross-check it against the queue head.
pub(crate) struct Resolution {
    pub combatant: CombatantId,
    pub action: Action,
}

/// At most one resolution message can be outstanding per combatant.
const RESOLUTION_BUFFER: usize = 2;

pub(crate) struct ResolutionScheduler {
    resolution_tx: mpsc::Sender<Resolution>,
    timers: HashMap<CombatantId, JoinHandle<()>>,
}

impl ResolutionScheduler {
    pub fn new() -> (Self, mpsc::Receiver<Resolution>) {
        let (resolution_tx, resolution_rx) = mpsc::channel(RESOLUTION_BUFFER);
        (
            Self {
                resolution_tx,
                timers: HashMap::new(),
            },
            resolution_rx,
        )
    }

    /// Starts a timer that delivers `request.action` back to the worker
    /// after `request.delay`.
    ///
    /// Callers must check the combatant's in-flight flag first: scheduling
    /// while a timer is still live for the same combatant is a programmer
    /// error, caught here in debug builds.
    pub fn schedule(&mut self, combatant: CombatantId, request: TimerRequest) {
        debug_assert!(
            !self.is_timing(combatant),
            "combatant {combatant} already has an active timer"
        );

        let TimerRequest { action, delay } = request;
        debug!(
            target: "runtime::scheduler",
            %combatant,
            action = %action.name,
            delay_secs = delay.as_secs(),
            "loading timer started"
        );

        let tx = self.resolution_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The worker may already be shutting down; a dropped receiver
            // is harmless.
            let _ = tx.send(Resolution { combatant, action }).await;
        });
        self.timers.insert(combatant, handle);
    }

    /// True while a timer task is live for `combatant`.
    pub fn is_timing(&self, combatant: CombatantId) -> bool {
        self.timers
            .get(&combatant)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Drops the bookkeeping entry once the combatant's resolution message
    /// has been taken off the channel.
    pub fn acknowledge(&mut self, combatant: CombatantId) {
        self.timers.remove(&combatant);
    }

    /// Aborts every outstanding timer. Battle teardown only; a specific
    /// mid-flight action can never be cancelled.
    pub fn cancel_all(&mut self) {
        for (combatant, handle) in self.timers.drain() {
            debug!(target: "runtime::scheduler", %combatant, "timer cancelled at teardown");
            handle.abort();
        }
    }
}
