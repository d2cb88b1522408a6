//! Hero index rows

use serde::Serialize;

use crate::hero::Hero;
use crate::reference;

/// One hero as listed in the index, with multi-valued fields as labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSummary {
    pub index: usize,
    pub name: String,
    pub level: u8,
    pub attack: u8,
    pub defense: u8,
    pub power: u8,
    pub knowledge: u8,
    pub experience: u32,
    pub mana: u16,
    pub movement_total: u32,
    pub movement_left: u32,
    pub army: Vec<String>,
    pub artifacts: Vec<String>,
    pub inventory: Vec<String>,
    pub skills: Vec<String>,
    pub spells: Vec<String>,
    pub modified: bool,
}

impl HeroSummary {
    pub fn from_hero(index: usize, hero: &Hero) -> Self {
        let state = &hero.state;
        HeroSummary {
            index,
            name: hero.name.clone(),
            level: state.stats.level,
            attack: state.stats.attack,
            defense: state.stats.defense,
            power: state.stats.power,
            knowledge: state.stats.knowledge,
            experience: state.stats.experience,
            mana: state.stats.mana,
            movement_total: hero.movement.total,
            movement_left: hero.movement.left,
            army: state.army.iter().flatten().map(|t| t.to_string()).collect(),
            artifacts: state.artifacts.iter().map(|(_, item)| item.to_string()).collect(),
            inventory: state.inventory.iter().flatten().map(|i| i.to_string()).collect(),
            skills: state
                .skills
                .iter()
                .map(|s| format!("{} {}", s.level, s.name()))
                .collect(),
            spells: state
                .available
                .iter()
                .map(|&id| reference::spell_label(id))
                .collect(),
            modified: hero.is_modified(),
        }
    }
}
