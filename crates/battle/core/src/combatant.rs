//! Combatant model: identity, resource pools, and the pending-action queue.
//!
//! Mutations here are deliberately unvalidated: affordability and
//! withdrawal rules are enforced in one place, the
//! [`crate::engine::CombatEngine`], so the invariant checks never diverge.

use std::collections::VecDeque;
use std::fmt;

use crate::action::Action;

/// Identifies one side of a battle.
///
/// A battle owns exactly one combatant per role, so the role doubles as the
/// combatant's identity.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantId {
    /// The controlled fighter.
    Hero,
    /// The opposing entity. Its actions arrive through the same contract.
    Opponent,
}

impl CombatantId {
    /// Returns the other side of the battle.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            CombatantId::Hero => CombatantId::Opponent,
            CombatantId::Opponent => CombatantId::Hero,
        }
    }
}

/// Stats consumed by the damage formulas.
///
/// All values are positive; the content layer validates templates before a
/// battle is assembled, so division by zero is a configuration error rather
/// than a runtime path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub constitution: u32,
    pub magic_power: u32,
    pub spirit: u32,
}

/// One side of the battle: resource pools plus the FIFO queue of requested
/// but not-yet-resolved actions.
///
/// `health` is signed: a lethal resolution may drive it below zero and the
/// engine never clamps it back up. `energy` stays within `0..=max_energy`
/// because the only mutations are engine-validated spends and clamped
/// restores.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub max_health: u32,
    pub health: i64,
    pub max_energy: u32,
    pub energy: u32,
    pub attributes: Attributes,
    queue: VecDeque<Action>,
    in_flight: bool,
}

impl Combatant {
    /// Creates a combatant at full health and energy with an empty queue.
    pub fn new(id: CombatantId, name: impl Into<String>, max_health: u32, max_energy: u32, attributes: Attributes) -> Self {
        Self {
            id,
            name: name.into(),
            max_health,
            health: max_health as i64,
            max_energy,
            energy: max_energy,
            attributes,
            queue: VecDeque::new(),
            in_flight: false,
        }
    }

    /// True iff `cost` can be paid from the current energy pool.
    #[inline]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.energy >= cost
    }

    /// Deducts energy. The engine validates affordability first.
    pub fn spend_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    /// Returns energy, clamped to the pool maximum.
    pub fn restore_energy(&mut self, amount: u32) {
        self.energy = (self.energy + amount).min(self.max_energy);
    }

    /// Subtracts damage from health. Health may go to zero or below.
    pub fn apply_damage(&mut self, amount: u32) {
        self.health -= amount as i64;
    }

    /// True once health has dropped to zero or below.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    // ===== queue operations =====

    /// Appends an action to the back of the queue.
    pub fn enqueue(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// The action currently at the head of the queue, if any.
    pub fn peek_head(&self) -> Option<&Action> {
        self.queue.front()
    }

    /// Removes and returns the queue head.
    pub fn pop_head(&mut self) -> Option<Action> {
        self.queue.pop_front()
    }

    /// Removes and returns the action at `index`, shifting later entries
    /// forward. Returns `None` when out of bounds.
    pub fn remove_queued(&mut self, index: usize) -> Option<Action> {
        self.queue.remove(index)
    }

    /// Number of pending actions, including the in-flight head.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Pending actions in FIFO order.
    pub fn queue(&self) -> impl Iterator<Item = &Action> {
        self.queue.iter()
    }

    /// Whether the queue head is currently timing toward resolution.
    #[inline]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Marks or clears the in-flight timer flag. Owned by the engine: the
    /// flag must be true iff a timer is active for this combatant.
    pub(crate) fn set_in_flight(&mut self, value: bool) {
        self.in_flight = value;
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::DamageKind;

    fn test_attributes() -> Attributes {
        Attributes {
            strength: 10,
            constitution: 10,
            magic_power: 10,
            spirit: 10,
        }
    }

    fn kick() -> Action {
        Action {
            name: "Kick".into(),
            kind: DamageKind::Physical,
            cost: 0,
            damage: 10,
            loading_secs: 1,
            origin: CombatantId::Hero,
            target: CombatantId::Opponent,
        }
    }

    #[test]
    fn energy_restores_clamp_at_max() {
        let mut c = Combatant::new(CombatantId::Hero, "Hero", 100, 20, test_attributes());
        c.spend_energy(5);
        assert_eq!(c.energy, 15);
        c.restore_energy(50);
        assert_eq!(c.energy, 20);
    }

    #[test]
    fn health_goes_below_zero() {
        let mut c = Combatant::new(CombatantId::Hero, "Hero", 10, 20, test_attributes());
        c.apply_damage(25);
        assert_eq!(c.health, -15);
        assert!(c.is_defeated());
    }

    #[test]
    fn queue_is_fifo() {
        let mut c = Combatant::new(CombatantId::Hero, "Hero", 100, 20, test_attributes());
        let mut second = kick();
        second.name = "Second".into();
        c.enqueue(kick());
        c.enqueue(second);

        assert_eq!(c.peek_head().unwrap().name, "Kick");
        assert_eq!(c.pop_head().unwrap().name, "Kick");
        assert_eq!(c.pop_head().unwrap().name, "Second");
        assert!(c.pop_head().is_none());
    }

    #[test]
    fn remove_queued_rejects_out_of_bounds() {
        let mut c = Combatant::new(CombatantId::Hero, "Hero", 100, 20, test_attributes());
        c.enqueue(kick());
        assert!(c.remove_queued(3).is_none());
        assert_eq!(c.queue_len(), 1);
    }

    #[test]
    fn other_side_round_trips() {
        assert_eq!(CombatantId::Hero.other(), CombatantId::Opponent);
        assert_eq!(CombatantId::Opponent.other(), CombatantId::Hero);
    }
}
