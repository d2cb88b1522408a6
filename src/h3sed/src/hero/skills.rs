//! Secondary skills

use super::layout::{SKILLS_COUNT, SKILLS_LEVEL, SKILLS_SLOT, SKILL_COUNT};
use super::ParseWarning;
use crate::reference::{self, SkillLevel};

/// A learned secondary skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillEntry {
    pub skill: u8,
    pub level: SkillLevel,
}

impl SkillEntry {
    pub fn name(&self) -> &'static str {
        reference::skill_by_id(self.skill).map_or("?", |s| s.name)
    }
}

/// Decode learned skills in slot order
///
/// Each skill has a level byte and a 1-based slot byte; entries whose slot
/// is beyond the stored skill count are ignored.
pub(super) fn parse(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> Vec<SkillEntry> {
    let count = bytes[SKILLS_COUNT] as usize;
    let mut slotted = Vec::new();
    for skill in 0..SKILL_COUNT {
        let level = bytes[SKILLS_LEVEL + skill];
        let slot = bytes[SKILLS_SLOT + skill] as usize;
        if level == 0 || slot == 0 {
            continue;
        }
        let Some(level) = SkillLevel::from_byte(level) else {
            continue;
        };
        if slot > count {
            warnings.push(ParseWarning::new(
                "skills",
                format!("skill #{} in slot {} beyond skill count {}", skill, slot, count),
            ));
            continue;
        }
        slotted.push((
            slot,
            SkillEntry {
                skill: skill as u8,
                level,
            },
        ));
    }
    slotted.sort_by_key(|(slot, _)| *slot);
    slotted.into_iter().map(|(_, entry)| entry).collect()
}

/// Rewrite the skill count, level and slot tables
pub(super) fn write(skills: &[SkillEntry], bytes: &mut [u8]) {
    bytes[SKILLS_LEVEL..SKILLS_LEVEL + SKILL_COUNT].fill(0);
    bytes[SKILLS_SLOT..SKILLS_SLOT + SKILL_COUNT].fill(0);
    for (slot, entry) in skills.iter().enumerate() {
        let pos = entry.skill as usize;
        bytes[SKILLS_LEVEL + pos] = entry.level as u8;
        bytes[SKILLS_SLOT + pos] = (slot + 1) as u8;
    }
    bytes[SKILLS_COUNT] = skills.len() as u8;
}
