//! Action definitions.
//!
//! Actions are immutable catalog rows: a combatant requests one by name, the
//! engine charges its cost up front, and the action resolves after its
//! loading delay has elapsed.

use std::time::Duration;

use crate::combatant::CombatantId;

/// Damage formula applied when an action resolves.
///
/// A closed set: adding a new formula means extending this enum and
/// [`crate::combat::compute_damage`], never inspecting ad-hoc properties.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageKind {
    /// Scales with the origin's strength against the target's constitution.
    Physical,
    /// Scales with the origin's magic power against the target's spirit.
    Magic,
}

/// Immutable definition of a combat move.
///
/// Cost and damage are non-negative by construction (`u32`). `loading_secs`
/// is the delay between the action reaching the head of its owner's queue
/// and its resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub name: String,
    pub kind: DamageKind,
    /// Energy charged when the action is enqueued, refunded on withdrawal.
    pub cost: u32,
    /// Base damage fed into the formula for `kind`.
    pub damage: u32,
    /// Seconds the action spends loading once it becomes the queue head.
    pub loading_secs: u64,
    pub origin: CombatantId,
    pub target: CombatantId,
}

impl Action {
    /// Loading delay in the host timing unit.
    pub fn loading(&self) -> Duration {
        Duration::from_secs(self.loading_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn damage_kind_parses_snake_case() {
        assert_eq!(DamageKind::from_str("physical"), Ok(DamageKind::Physical));
        assert_eq!(DamageKind::from_str("Magic"), Ok(DamageKind::Magic));
        assert!(DamageKind::from_str("psychic").is_err());
    }

    #[test]
    fn loading_converts_to_duration() {
        let action = Action {
            name: "H2O".into(),
            kind: DamageKind::Magic,
            cost: 5,
            damage: 50,
            loading_secs: 5,
            origin: CombatantId::Hero,
            target: CombatantId::Opponent,
        };
        assert_eq!(action.loading(), Duration::from_secs(5));
    }
}
