//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections and worker coordination failures so clients can
//! bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{CombatantId, EngineError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected the operation. These are the recoverable
    /// rule-level failures: insufficient resources, invalid withdrawal,
    /// unknown action, concluded battle.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to load battle content")]
    Content(#[source] anyhow::Error),

    #[error("no action provider set for {combatant}")]
    ProviderNotSet { combatant: CombatantId },
}
