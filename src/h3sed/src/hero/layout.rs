//! Byte layout of a hero record
//!
//! Offsets are relative to the start of the record, which is the total
//! movement points field. All multi-byte integers are little-endian.

use byteorder::{ByteOrder, LittleEndian};

use crate::reference::SlotCategory;

/// Length of a hero record in bytes
pub const RECORD_LEN: usize = 1025;

pub const MOVEMENT_TOTAL: usize = 0;
pub const MOVEMENT_LEFT: usize = 4;
pub const EXPERIENCE: usize = 8;
pub const SKILLS_COUNT: usize = 12;
pub const MANA: usize = 16;
pub const LEVEL: usize = 18;

pub const ARMY_TYPES: usize = 82;
pub const ARMY_COUNTS: usize = 110;
pub const ARMY_SLOTS: usize = 7;

pub const NAME: usize = 138;
pub const NAME_LEN: usize = 13;

pub const SKILLS_LEVEL: usize = 151;
pub const SKILLS_SLOT: usize = 179;
pub const SKILL_COUNT: usize = 28;

pub const ATTACK: usize = 207;
pub const DEFENSE: usize = 208;
pub const POWER: usize = 209;
pub const KNOWLEDGE: usize = 210;

pub const SPELLS_BOOK: usize = 211;
pub const SPELLS_AVAILABLE: usize = 281;
pub const SPELL_COUNT: usize = 70;

/// Start of the 19 worn artifact cells
pub const EQUIPMENT: usize = 351;
/// Start of the 64 backpack cells
pub const INVENTORY: usize = 503;
pub const INVENTORY_SLOTS: usize = 64;
/// Size of one artifact cell
pub const CELL: usize = 8;

/// Start of the per-category counters of slots taken by combination artifacts
pub const RESERVED: usize = 1016;

/// Filler byte for blank cells and army slots
pub const BLANK: u8 = 0xFF;

/// Offset of the reserved-slot counter for a slot category
pub fn reserved_offset(category: SlotCategory) -> Option<usize> {
    SlotCategory::RESERVABLE
        .iter()
        .position(|&c| c == category)
        .map(|i| RESERVED + i)
}

pub fn read_u16(bytes: &[u8], pos: usize) -> u16 {
    LittleEndian::read_u16(&bytes[pos..pos + 2])
}

pub fn read_u32(bytes: &[u8], pos: usize) -> u32 {
    LittleEndian::read_u32(&bytes[pos..pos + 4])
}

pub fn write_u16(bytes: &mut [u8], pos: usize, value: u16) {
    LittleEndian::write_u16(&mut bytes[pos..pos + 2], value);
}

pub fn write_u32(bytes: &mut [u8], pos: usize, value: u32) {
    LittleEndian::write_u32(&mut bytes[pos..pos + 4], value);
}
