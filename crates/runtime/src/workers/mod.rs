//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker executes commands and expired timers against the
//! authoritative battle state; the resolution scheduler owns the timer
//! tasks themselves.

mod battle;
mod scheduler;

pub(crate) use battle::{BattleWorker, Command};
