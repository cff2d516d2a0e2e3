//! Action catalog loader.
//!
//! Loads each side's move set from embedded RON data files and assembles
//! the [`ActionCatalog`]. Origin and target are implied by the file a move
//! comes from: every hero move targets the opponent and vice versa.

use anyhow::Context;
use serde::Deserialize;

use battle_core::{Action, ActionCatalog, CombatantId, DamageKind};

/// One catalog row as written in the data files. Origin and target are
/// filled in by the loader from the owning side.
#[derive(Debug, Clone, Deserialize)]
struct ActionSpec {
    name: String,
    kind: DamageKind,
    cost: u32,
    damage: u32,
    /// Loading delay in seconds.
    loading: u64,
}

impl ActionSpec {
    fn into_action(self, origin: CombatantId) -> Action {
        Action {
            name: self.name,
            kind: self.kind,
            cost: self.cost,
            damage: self.damage,
            loading_secs: self.loading,
            origin,
            target: origin.other(),
        }
    }
}

/// Builds the action catalog from embedded RON data.
pub struct ActionCatalogLoader;

impl ActionCatalogLoader {
    /// Loads both sides' move sets.
    pub fn load() -> anyhow::Result<ActionCatalog> {
        let mut entries = Vec::new();

        let hero_specs: Vec<ActionSpec> =
            ron::from_str(include_str!("../../data/actions/hero.ron"))
                .context("failed to parse actions/hero.ron")?;
        entries.extend(
            hero_specs
                .into_iter()
                .map(|spec| spec.into_action(CombatantId::Hero)),
        );

        let opponent_specs: Vec<ActionSpec> =
            ron::from_str(include_str!("../../data/actions/opponent.ron"))
                .context("failed to parse actions/opponent.ron")?;
        entries.extend(
            opponent_specs
                .into_iter()
                .map(|spec| spec.into_action(CombatantId::Opponent)),
        );

        Ok(ActionCatalog::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_both_move_sets() {
        let catalog = ActionCatalogLoader::load().expect("catalog data should parse");

        assert_eq!(catalog.len(), 4);

        let h2o = catalog
            .get(CombatantId::Hero, "H2O")
            .expect("hero should know H2O");
        assert_eq!(h2o.kind, DamageKind::Magic);
        assert_eq!(h2o.cost, 5);
        assert_eq!(h2o.damage, 50);
        assert_eq!(h2o.loading_secs, 5);
        assert_eq!(h2o.target, CombatantId::Opponent);

        let breath = catalog
            .get(CombatantId::Opponent, "Fire breath")
            .expect("opponent should know Fire breath");
        assert_eq!(breath.cost, 12);
        assert_eq!(breath.loading_secs, 8);
        assert_eq!(breath.target, CombatantId::Hero);
    }

    #[test]
    fn move_sets_are_side_scoped() {
        let catalog = ActionCatalogLoader::load().unwrap();

        assert!(catalog.get(CombatantId::Opponent, "Kick").is_none());
        assert!(catalog.get(CombatantId::Hero, "Claw").is_none());
    }
}
