//! Runtime orchestration for the timed combat simulation.
//!
//! This crate wires the pure [`battle_core`] engine to real timers. A single
//! background worker exclusively owns the [`battle_core::Battle`]; commands
//! and expired loading timers reach it over channels and are processed to
//! completion one at a time, which is what keeps combatant mutation
//! race-free without locks. Consumers embed [`BattleRuntime`] to start an
//! engagement and interact through the cloneable [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - `workers` keeps the battle worker and resolution scheduler internal
pub mod api;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, BattleEvent, BattleHandle, IdleProvider, Result, RuntimeError,
    ScriptedProvider,
};
pub use runtime::{BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
