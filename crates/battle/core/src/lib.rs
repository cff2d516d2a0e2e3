//! Deterministic combat rules shared across the runtime and offline tools.
//!
//! `battle-core` defines the canonical model of a two-sided battle: the
//! action catalog, combatant resource pools and queues, and the
//! [`engine::CombatEngine`] facade. All combatant mutation flows through the
//! engine; everything else in this crate is plain data. The crate is pure:
//! timers live in the runtime, which executes the scheduling directives the
//! engine returns.
pub mod action;
pub mod battle;
pub mod catalog;
pub mod combat;
pub mod combatant;
pub mod engine;

pub use action::{Action, DamageKind};
pub use battle::{Battle, BattlePhase, BattleSnapshot, CombatantSnapshot};
pub use catalog::ActionCatalog;
pub use combat::compute_damage;
pub use combatant::{Attributes, Combatant, CombatantId};
pub use engine::{CombatEngine, EngineError, RequestOutcome, ResolutionOutcome, TimerRequest};
