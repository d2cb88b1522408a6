//! Synthetic hero records for tests

use super::inventory::write_cell;
use super::layout::{self, *};
use super::{Item, WornSlot};
use crate::edition::Edition;
use crate::reference::{SkillLevel, SlotCategory};

/// Builds a hero record that the extraction rules accept
pub(crate) struct RecordBuilder {
    bytes: Vec<u8>,
    skills: u8,
}

impl RecordBuilder {
    pub fn new(name: &str) -> Self {
        let mut bytes = vec![0u8; RECORD_LEN];
        bytes[ARMY_TYPES..ARMY_TYPES + ARMY_SLOTS * 4].fill(BLANK);
        bytes[NAME..NAME + name.len()].copy_from_slice(name.as_bytes());
        bytes[EQUIPMENT..RESERVED - 1].fill(BLANK);
        RecordBuilder { bytes, skills: 0 }
    }

    pub fn movement(mut self, total: u32, left: u32) -> Self {
        layout::write_u32(&mut self.bytes, MOVEMENT_TOTAL, total);
        layout::write_u32(&mut self.bytes, MOVEMENT_LEFT, left);
        self
    }

    pub fn primary(mut self, values: [u8; 4]) -> Self {
        self.bytes[ATTACK..=KNOWLEDGE].copy_from_slice(&values);
        self
    }

    pub fn experience(mut self, value: u32) -> Self {
        layout::write_u32(&mut self.bytes, EXPERIENCE, value);
        self
    }

    pub fn level(mut self, value: u8) -> Self {
        self.bytes[LEVEL] = value;
        self
    }

    pub fn mana(mut self, value: u16) -> Self {
        layout::write_u16(&mut self.bytes, MANA, value);
        self
    }

    pub fn troop(mut self, slot: usize, creature: u32, count: u32) -> Self {
        layout::write_u32(&mut self.bytes, ARMY_TYPES + slot * 4, creature);
        layout::write_u32(&mut self.bytes, ARMY_COUNTS + slot * 4, count);
        self
    }

    /// Empty army slot filled with zeros instead of 0xFF
    pub fn zero_filled_army(self, slot: usize) -> Self {
        self.troop(slot, 0, 0)
    }

    pub fn skill(mut self, skill: u8, level: SkillLevel) -> Self {
        self.skills += 1;
        self.bytes[SKILLS_LEVEL + skill as usize] = level as u8;
        self.bytes[SKILLS_SLOT + skill as usize] = self.skills;
        self.bytes[SKILLS_COUNT] = self.skills;
        self
    }

    pub fn worn(mut self, slot: WornSlot, artifact: u32) -> Self {
        write_cell(&mut self.bytes, slot.offset(), Some(Item::Artifact(artifact)));
        self
    }

    pub fn carry(mut self, slot: usize, item: Item) -> Self {
        write_cell(&mut self.bytes, INVENTORY + slot * CELL, Some(item));
        self
    }

    /// Put a spell in the spellbook, which also makes it available
    pub fn spell(mut self, spell: u8) -> Self {
        self.bytes[SPELLS_BOOK + spell as usize] = 1;
        self.bytes[SPELLS_AVAILABLE + spell as usize] = 1;
        self
    }

    pub fn reserved(mut self, category: SlotCategory, count: u8) -> Self {
        if let Some(pos) = layout::reserved_offset(category) {
            self.bytes[pos] = count;
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Raw game state holding the records after the search offset
pub(crate) fn padded_raw(records: &[&Vec<u8>]) -> Vec<u8> {
    let mut raw = vec![0u8; Edition::Sod.rules().search_from];
    for record in records {
        raw.extend_from_slice(record);
        raw.extend_from_slice(&[0u8; 16]);
    }
    raw
}
