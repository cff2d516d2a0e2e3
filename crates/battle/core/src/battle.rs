//! Battle aggregate and read-only snapshots.
//!
//! A [`Battle`] owns both combatants for the duration of one engagement and
//! is the unit of lifecycle: created at engagement start, concluded when a
//! combatant's health reaches zero or the host tears it down. All mutation
//! goes through [`crate::engine::CombatEngine`]; consumers observe state via
//! [`BattleSnapshot`].

use crate::action::Action;
use crate::combatant::{Combatant, CombatantId};

/// Lifecycle phase of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    /// Both combatants stand; requests are accepted.
    Active,
    /// A combatant fell. No further requests are accepted.
    /// `victor` is `None` when the battle was terminated externally.
    Concluded { victor: Option<CombatantId> },
}

/// Exclusive owner of both combatants.
#[derive(Clone, Debug)]
pub struct Battle {
    hero: Combatant,
    opponent: Combatant,
    phase: BattlePhase,
}

impl Battle {
    /// Assembles a battle from its two sides.
    ///
    /// # Panics
    ///
    /// Panics if a combatant was built for the wrong role. Battles are
    /// assembled once at engagement start, so a mismatch is a wiring bug.
    pub fn new(hero: Combatant, opponent: Combatant) -> Self {
        assert_eq!(hero.id, CombatantId::Hero, "hero slot holds a non-hero combatant");
        assert_eq!(
            opponent.id,
            CombatantId::Opponent,
            "opponent slot holds a non-opponent combatant"
        );
        Self {
            hero,
            opponent,
            phase: BattlePhase::Active,
        }
    }

    pub fn combatant(&self, id: CombatantId) -> &Combatant {
        match id {
            CombatantId::Hero => &self.hero,
            CombatantId::Opponent => &self.opponent,
        }
    }

    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> &mut Combatant {
        match id {
            CombatantId::Hero => &mut self.hero,
            CombatantId::Opponent => &mut self.opponent,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: BattlePhase) {
        self.phase = phase;
    }

    pub fn is_active(&self) -> bool {
        self.phase == BattlePhase::Active
    }

    /// Read-only view of the whole battle for presentation layers.
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            hero: CombatantSnapshot::of(&self.hero),
            opponent: CombatantSnapshot::of(&self.opponent),
            phase: self.phase,
        }
    }
}

/// Point-in-time view of one combatant.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub health: i64,
    pub max_health: u32,
    pub energy: u32,
    pub max_energy: u32,
    /// Pending actions in FIFO order; index 0 is the in-flight head.
    pub queue: Vec<Action>,
    pub in_flight: bool,
}

impl CombatantSnapshot {
    fn of(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name.clone(),
            health: combatant.health,
            max_health: combatant.max_health,
            energy: combatant.energy,
            max_energy: combatant.max_energy,
            queue: combatant.queue().cloned().collect(),
            in_flight: combatant.in_flight(),
        }
    }
}

/// Point-in-time view of the battle, published after every mutation so an
/// external renderer always has the latest state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub hero: CombatantSnapshot,
    pub opponent: CombatantSnapshot,
    pub phase: BattlePhase,
}

impl BattleSnapshot {
    pub fn combatant(&self, id: CombatantId) -> &CombatantSnapshot {
        match id {
            CombatantId::Hero => &self.hero,
            CombatantId::Opponent => &self.opponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Attributes;

    fn combatant(id: CombatantId) -> Combatant {
        Combatant::new(
            id,
            "test",
            100,
            20,
            Attributes {
                strength: 10,
                constitution: 10,
                magic_power: 10,
                spirit: 10,
            },
        )
    }

    #[test]
    fn snapshot_reflects_state() {
        let battle = Battle::new(combatant(CombatantId::Hero), combatant(CombatantId::Opponent));
        let snapshot = battle.snapshot();

        assert_eq!(snapshot.phase, BattlePhase::Active);
        assert_eq!(snapshot.hero.health, 100);
        assert_eq!(snapshot.opponent.energy, 20);
        assert!(snapshot.hero.queue.is_empty());
        assert!(!snapshot.hero.in_flight);
    }

    #[test]
    #[should_panic(expected = "hero slot")]
    fn rejects_role_mismatch() {
        Battle::new(combatant(CombatantId::Opponent), combatant(CombatantId::Hero));
    }
}
