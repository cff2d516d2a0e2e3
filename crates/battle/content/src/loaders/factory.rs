//! Convenience assembly of a standard engagement.

use battle_core::{ActionCatalog, Battle};

use super::{ActionCatalogLoader, CombatantRegistry};

/// Assembles battles from the embedded content.
pub struct ContentFactory;

impl ContentFactory {
    /// Builds the standard engagement: the hero against the dragon, with
    /// the opponent's pools scaled to `level`.
    pub fn standard_battle(level: u32) -> anyhow::Result<(Battle, ActionCatalog)> {
        let registry = CombatantRegistry::load()?;
        let catalog = ActionCatalogLoader::load()?;
        let battle = Battle::new(registry.hero(), registry.opponent(level));
        Ok((battle, catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattlePhase, CombatantId};

    #[test]
    fn standard_battle_is_ready_to_fight() {
        let (battle, catalog) = ContentFactory::standard_battle(1).expect("content should load");

        assert_eq!(battle.phase(), BattlePhase::Active);
        assert_eq!(battle.combatant(CombatantId::Hero).health, 100);
        assert_eq!(battle.combatant(CombatantId::Opponent).health, 400);
        assert!(catalog.get(CombatantId::Hero, "Kick").is_some());
        assert!(catalog.get(CombatantId::Opponent, "Fire breath").is_some());
    }
}
