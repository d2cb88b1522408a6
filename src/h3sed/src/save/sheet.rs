//! Hero sheets: the YAML form of a hero's editable state
//!
//! A sheet is written as a single-entry map keyed by hero name:
//!
//! ```yaml
//! Gelu:
//!   stats: {attack: 5, defense: 4, power: 3, knowledge: 2, experience: 1200, level: 4, mana: 20}
//!   army: ["Sharpshooter:12", null, null, null, null, null, null]
//!   artifacts: {weapon: "Centaur's Axe", spellbook: Spellbook}
//!   spells: [Haste]
//! ```
//!
//! Every section is optional when pasting; missing sections are left as
//! they are. Movement is exported for reference and ignored on paste.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::edit::{check_slots, check_stats, EditRules, SKILLS_MAX};
use super::SaveError;
use crate::hero::{
    layout, stack_count, ArmySlot, HeroState, Item, Movement, SkillEntry, Stats, Troop, WornSlot,
};
use crate::reference::{self, SkillLevel};

/// Section keys of a bare sheet
const SECTIONS: [&str; 7] = [
    "stats",
    "movement",
    "skills",
    "army",
    "artifacts",
    "inventory",
    "spells",
];

/// A learned skill as it appears in a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSheet {
    pub name: String,
    pub level: SkillLevel,
}

/// Hero state in a name-based, human-editable form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroSheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillSheet>>,
    /// `Creature:count` per army slot, null for empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub army: Option<Vec<Option<String>>>,
    /// Artifact name per worn slot, null for empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<BTreeMap<String, Option<String>>>,
    /// Backpack cells, trailing empty cells omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<Option<String>>>,
    /// Spells in the spellbook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spells: Option<Vec<String>>,
}

impl HeroSheet {
    pub fn from_state(state: &HeroState, movement: Movement) -> Self {
        let skills = state
            .skills
            .iter()
            .map(|s| SkillSheet {
                name: s.name().to_string(),
                level: s.level,
            })
            .collect();
        let army = state.army.iter().map(|t| t.map(|t| t.to_string())).collect();
        let artifacts = WornSlot::ALL
            .into_iter()
            .map(|slot| {
                let item = state.artifacts.get(slot).map(|i| i.to_string());
                (slot.name().to_string(), item)
            })
            .collect();
        let mut inventory: Vec<Option<String>> = state
            .inventory
            .iter()
            .map(|i| i.map(|i| i.to_string()))
            .collect();
        while inventory.last().map_or(false, Option::is_none) {
            inventory.pop();
        }
        let spells = state
            .spells
            .iter()
            .map(|&id| reference::spell_label(id))
            .collect();

        HeroSheet {
            stats: Some(state.stats),
            movement: Some(movement),
            skills: Some(skills),
            army: Some(army),
            artifacts: Some(artifacts),
            inventory: Some(inventory),
            spells: Some(spells),
        }
    }

    /// Build a new hero state from `base` with the sheet's sections applied
    ///
    /// Validates every name against the edition and map rules. When the
    /// sheet replaces artifacts but not stats, attribute bonuses move with
    /// the artifacts.
    pub fn apply(&self, base: &HeroState, rules: &EditRules) -> Result<HeroState, SaveError> {
        let mut state = base.clone();

        if let Some(skills) = &self.skills {
            state.skills = parse_skills(skills, rules)?;
        }
        if let Some(army) = &self.army {
            state.army = parse_army(army, rules)?;
        }
        if let Some(artifacts) = &self.artifacts {
            let mut equipment = state.artifacts;
            for (slot, label) in artifacts {
                let slot: WornSlot = slot
                    .parse()
                    .map_err(|_| SaveError::UnknownField(format!("artifacts.{}", slot)))?;
                let item = label
                    .as_deref()
                    .map(|label| parse_item(label, &format!("artifacts.{}", slot)))
                    .transpose()?;
                if let Some(item) = item {
                    rules.check_wearable(slot, item)?;
                }
                equipment.set(slot, item);
            }
            for (slot, item) in equipment.iter() {
                if state.artifacts.get(slot) != Some(item) {
                    check_slots(&equipment, item)?;
                }
            }
            if self.stats.is_none() {
                for slot in WornSlot::ALL {
                    state
                        .stats
                        .swap_bonus(state.artifacts.bonus(slot), equipment.bonus(slot));
                }
            }
            state.artifacts = equipment;
            if !state.artifacts.has_spellbook() {
                state.spells.clear();
            }
        }
        if let Some(inventory) = &self.inventory {
            state.inventory = parse_inventory(inventory, rules)?;
        }
        if let Some(stats) = &self.stats {
            check_stats(stats)?;
            state.stats = *stats;
        }
        if let Some(spells) = &self.spells {
            state.spells = parse_spells(spells)?;
            if !state.spells.is_empty() && !state.artifacts.has_spellbook() {
                return Err(SaveError::NoSpellbook);
            }
        }

        state.refresh_available(&rules.bans.spells);
        Ok(state)
    }

    /// Serialize as a single-entry map keyed by hero name
    pub fn to_yaml(&self, name: &str) -> Result<String, SaveError> {
        let mut doc = BTreeMap::new();
        doc.insert(name, self);
        Ok(serde_yaml::to_string(&doc)?)
    }

    /// Parse a sheet, keyed by hero name or bare
    pub fn from_yaml(text: &str) -> Result<(Option<String>, HeroSheet), SaveError> {
        if let Ok(mut doc) = serde_yaml::from_str::<BTreeMap<String, HeroSheet>>(text) {
            let name = doc
                .keys()
                .next()
                .filter(|name| doc.len() == 1 && !SECTIONS.contains(&name.as_str()))
                .cloned();
            if let Some(name) = name {
                let sheet = doc.remove(&name).unwrap_or_default();
                return Ok((Some(name), sheet));
            }
        }
        Ok((None, serde_yaml::from_str(text)?))
    }
}

fn parse_item(label: &str, field: &str) -> Result<Item, SaveError> {
    Item::from_label(label).ok_or_else(|| SaveError::InvalidValue {
        field: field.to_string(),
        reason: format!("unknown artifact '{}'", label),
    })
}

fn parse_skills(skills: &[SkillSheet], rules: &EditRules) -> Result<Vec<SkillEntry>, SaveError> {
    if skills.len() > SKILLS_MAX {
        return Err(SaveError::SlotIndex {
            index: skills.len() - 1,
            len: SKILLS_MAX,
        });
    }
    let mut entries: Vec<SkillEntry> = Vec::with_capacity(skills.len());
    for sheet in skills {
        let skill = reference::skill_by_name(&sheet.name).ok_or_else(|| SaveError::UnknownName {
            kind: "skill",
            name: sheet.name.clone(),
            edition: rules.edition,
        })?;
        if entries.iter().any(|e| e.skill == skill.id) {
            return Err(SaveError::InvalidValue {
                field: "skills".to_string(),
                reason: format!("{} listed more than once", skill.name),
            });
        }
        entries.push(SkillEntry {
            skill: skill.id,
            level: sheet.level,
        });
    }
    Ok(entries)
}

fn parse_army(
    army: &[Option<String>],
    rules: &EditRules,
) -> Result<[ArmySlot; layout::ARMY_SLOTS], SaveError> {
    if army.len() > layout::ARMY_SLOTS {
        return Err(SaveError::SlotIndex {
            index: army.len() - 1,
            len: layout::ARMY_SLOTS,
        });
    }
    let mut slots = [None; layout::ARMY_SLOTS];
    for (i, label) in army.iter().enumerate() {
        let Some(label) = label else {
            continue;
        };
        let troop = Troop::from_label(label).map_err(|reason| SaveError::InvalidValue {
            field: format!("army[{}]", i),
            reason,
        })?;
        rules.check_creature(&troop)?;
        slots[i] = Some(troop);
    }
    if stack_count(&slots) == 0 {
        return Err(SaveError::InvalidValue {
            field: "army".to_string(),
            reason: "a hero must keep at least one army stack".to_string(),
        });
    }
    Ok(slots)
}

fn parse_inventory(
    inventory: &[Option<String>],
    rules: &EditRules,
) -> Result<Vec<Option<Item>>, SaveError> {
    if inventory.len() > layout::INVENTORY_SLOTS {
        return Err(SaveError::SlotIndex {
            index: inventory.len() - 1,
            len: layout::INVENTORY_SLOTS,
        });
    }
    let mut cells = vec![None; layout::INVENTORY_SLOTS];
    for (i, label) in inventory.iter().enumerate() {
        let Some(label) = label else {
            continue;
        };
        let field = format!("inventory[{}]", i);
        let item = parse_item(label, &field)?;
        let artifact = rules.check_item(item)?;
        if !artifact.fits_inventory() {
            return Err(SaveError::InvalidValue {
                field,
                reason: format!("{} cannot be carried in the backpack", artifact.name),
            });
        }
        cells[i] = Some(item);
    }
    Ok(cells)
}

fn parse_spells(spells: &[String]) -> Result<BTreeSet<u8>, SaveError> {
    spells
        .iter()
        .map(|name| match reference::spell_by_name(name) {
            Some(spell) if !spell.special => Ok(spell.id),
            Some(spell) => Err(SaveError::InvalidValue {
                field: format!("spells.{}", spell.name),
                reason: "spell cannot be learned into a spellbook".to_string(),
            }),
            None => Err(SaveError::InvalidValue {
                field: "spells".to_string(),
                reason: format!("unknown spell '{}'", name),
            }),
        })
        .collect()
}
