//! Damage calculation.

use crate::action::{Action, DamageKind};
use crate::combatant::Attributes;

/// Calculate the damage an action deals when it resolves.
///
/// # Formula
///
/// ```text
/// physical: damage * origin.strength    / target.constitution
/// magic:    damage * origin.magic_power / target.spirit
/// ```
///
/// Integer division truncates toward zero, so the result is never negative.
/// The intermediate product is computed in `u64` to stay exact for any pair
/// of `u32` inputs. Divisor stats are guaranteed positive by the content
/// layer's template validation.
pub fn compute_damage(action: &Action, origin: &Attributes, target: &Attributes) -> u32 {
    let (scale, divisor) = match action.kind {
        DamageKind::Physical => (origin.strength, target.constitution),
        DamageKind::Magic => (origin.magic_power, target.spirit),
    };

    let raw = action.damage as u64 * scale as u64 / divisor as u64;
    raw.min(u32::MAX as u64) as u32
}
