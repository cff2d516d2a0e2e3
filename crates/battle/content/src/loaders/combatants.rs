//! Combatant template loader.
//!
//! Stat blocks live in `data/combatants.ron`. The loader validates the
//! stats the damage formulas divide by, so a zero divisor is caught at
//! load time rather than at resolution time.

use anyhow::{Context, ensure};
use serde::Deserialize;

use battle_core::{Attributes, Combatant, CombatantId};

/// Stat block for one side, as written in the data file.
#[derive(Debug, Clone, Deserialize)]
pub struct CombatantTemplate {
    pub name: String,
    pub max_health: u32,
    pub max_energy: u32,
    pub strength: u32,
    pub constitution: u32,
    pub magic_power: u32,
    pub spirit: u32,
    // Carried from the legacy stat blocks; no formula consumes them yet.
    pub luck: u32,
    pub speed: u32,
}

impl CombatantTemplate {
    fn attributes(&self) -> Attributes {
        Attributes {
            strength: self.strength,
            constitution: self.constitution,
            magic_power: self.magic_power,
            spirit: self.spirit,
        }
    }

    fn validate(&self, side: &str) -> anyhow::Result<()> {
        ensure!(self.max_health > 0, "{side}: max_health must be positive");
        ensure!(
            self.strength > 0 && self.constitution > 0 && self.magic_power > 0 && self.spirit > 0,
            "{side}: formula stats must be positive (division by zero otherwise)"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CombatantsFile {
    hero: CombatantTemplate,
    opponent: CombatantTemplate,
}

/// Registry of the stat templates for both sides.
#[derive(Debug, Clone)]
pub struct CombatantRegistry {
    hero: CombatantTemplate,
    opponent: CombatantTemplate,
}

impl CombatantRegistry {
    /// Loads and validates the embedded stat blocks.
    pub fn load() -> anyhow::Result<Self> {
        let file: CombatantsFile = ron::from_str(include_str!("../../data/combatants.ron"))
            .context("failed to parse combatants.ron")?;

        file.hero.validate("hero")?;
        file.opponent.validate("opponent")?;

        Ok(Self {
            hero: file.hero,
            opponent: file.opponent,
        })
    }

    /// Builds the controlled fighter at full pools.
    pub fn hero(&self) -> Combatant {
        Combatant::new(
            CombatantId::Hero,
            self.hero.name.clone(),
            self.hero.max_health,
            self.hero.max_energy,
            self.hero.attributes(),
        )
    }

    /// Builds the opposing entity. Its resource pools are per-level bases
    /// scaled by the hero's level.
    pub fn opponent(&self, level: u32) -> Combatant {
        let level = level.max(1);
        Combatant::new(
            CombatantId::Opponent,
            self.opponent.name.clone(),
            self.opponent.max_health * level,
            self.opponent.max_energy * level,
            self.opponent.attributes(),
        )
    }

    pub fn hero_template(&self) -> &CombatantTemplate {
        &self.hero
    }

    pub fn opponent_template(&self) -> &CombatantTemplate {
        &self.opponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_validates_templates() {
        let registry = CombatantRegistry::load().expect("combatant data should parse");

        let hero = registry.hero();
        assert_eq!(hero.name, "Hero");
        assert_eq!(hero.max_health, 100);
        assert_eq!(hero.max_energy, 20);
        assert_eq!(hero.energy, 20);
        assert_eq!(hero.attributes.strength, 10);
    }

    #[test]
    fn opponent_pools_scale_with_level() {
        let registry = CombatantRegistry::load().unwrap();

        let level_one = registry.opponent(1);
        assert_eq!(level_one.max_health, 400);
        assert_eq!(level_one.max_energy, 100);
        assert_eq!(level_one.attributes.spirit, 5);

        let level_three = registry.opponent(3);
        assert_eq!(level_three.max_health, 1200);
        assert_eq!(level_three.max_energy, 300);
        // Attributes do not scale, only pools.
        assert_eq!(level_three.attributes.strength, 100);
    }

    #[test]
    fn level_zero_is_clamped_to_one() {
        let registry = CombatantRegistry::load().unwrap();
        assert_eq!(registry.opponent(0).max_health, 400);
    }
}
