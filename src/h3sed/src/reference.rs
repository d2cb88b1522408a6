//! Reference data for Heroes III
//!
//! Hardcoded game catalog: creatures, artifacts, spells and secondary
//! skills, with the numeric ids the game uses in savefiles. Every entry
//! records the edition that introduced it, so lookups can be scoped to the
//! edition a savefile was detected as.

mod artifact;
mod creature;
mod skill;
mod spell;

pub use artifact::{
    artifact_by_id, artifact_by_name, artifacts_for, Artifact, PrimaryBonus, SlotCategory,
    SpellGrant, ARTIFACTS, SPELL_SCROLL,
};
pub use creature::{creature_by_id, creature_by_name, creatures_for, Creature, CREATURES};
pub use skill::{skill_by_id, skill_by_name, Skill, SkillLevel, SKILLS};
pub use spell::{spell_by_id, spell_by_name, spells_for, Schools, Spell, SPELLS};

use crate::edition::Edition;

/// Display name for a creature id, falling back to the raw id
pub fn creature_label(id: u32) -> String {
    creature_by_id(id)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| format!("Unknown creature #{}", id))
}

/// Display name for an artifact id, falling back to the raw id
pub fn artifact_label(id: u32) -> String {
    artifact_by_id(id)
        .map(|a| a.name.to_string())
        .unwrap_or_else(|| format!("Unknown artifact #{}", id))
}

/// Display name for a spell id, falling back to the raw id
pub fn spell_label(id: u8) -> String {
    spell_by_id(id)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| format!("Unknown spell #{}", id))
}

/// Whether a catalog entry introduced in `since` exists in `edition`
pub(crate) fn available_in(since: Edition, edition: Edition) -> bool {
    since <= edition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(creature_label(92), "Roc");
        assert_eq!(creature_label(9999), "Unknown creature #9999");
        assert_eq!(artifact_label(0), "Spellbook");
        assert_eq!(spell_label(53), "Haste");
        assert_eq!(spell_label(200), "Unknown spell #200");
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<u32> = CREATURES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CREATURES.len());

        let mut ids: Vec<u32> = ARTIFACTS.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ARTIFACTS.len());

        for (i, spell) in SPELLS.iter().enumerate() {
            assert_eq!(spell.id as usize, i);
        }
        for (i, skill) in SKILLS.iter().enumerate() {
            assert_eq!(skill.id as usize, i);
        }
    }

    #[test]
    fn test_combination_components_resolve() {
        for artifact in ARTIFACTS.iter().filter(|a| a.is_combination()) {
            for &component in artifact.components {
                assert!(
                    artifact_by_id(component).is_some(),
                    "{} lists unknown component {}",
                    artifact.name,
                    component
                );
            }
        }
    }
}
