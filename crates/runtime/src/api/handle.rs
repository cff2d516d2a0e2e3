//! Client-facing handle to a running battle.

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{BattleSnapshot, CombatantId};

use super::errors::{Result, RuntimeError};
use super::events::BattleEvent;
use crate::workers::Command;

/// Cloneable facade over the battle worker.
///
/// All methods enqueue a command and await the worker's reply; the worker
/// processes commands strictly one at a time, so two handles can never
/// interleave mutations.
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl BattleHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Requests an action by catalog name for `combatant`.
    ///
    /// The cost is charged and the action queued before this returns; the
    /// resolution itself happens after the action's loading delay.
    pub async fn request_action(
        &self,
        combatant: CombatantId,
        name: impl Into<String>,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::RequestAction {
                combatant,
                name: name.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Withdraws the queued action at `index` from `combatant`'s queue,
    /// refunding its cost. The head (`index == 0`) is irrevocable.
    pub async fn withdraw_action(&self, combatant: CombatantId, index: usize) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::WithdrawAction {
                combatant,
                index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Reads the current battle state (health, energy, queues, phase).
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribes to battle events (the render-trigger stream).
    pub fn subscribe_events(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_tx.subscribe()
    }
}
