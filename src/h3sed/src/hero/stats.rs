//! Primary attributes, experience, mana and movement

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::layout;
use crate::reference::PrimaryBonus;

/// Upper bound of a primary attribute
pub const PRIMARY_MAX: u8 = 99;

/// One of the four primary attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryStat {
    Attack,
    Defense,
    Power,
    Knowledge,
}

impl PrimaryStat {
    pub const ALL: [PrimaryStat; 4] = [
        PrimaryStat::Attack,
        PrimaryStat::Defense,
        PrimaryStat::Power,
        PrimaryStat::Knowledge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimaryStat::Attack => "attack",
            PrimaryStat::Defense => "defense",
            PrimaryStat::Power => "power",
            PrimaryStat::Knowledge => "knowledge",
        }
    }

    fn offset(self) -> usize {
        match self {
            PrimaryStat::Attack => layout::ATTACK,
            PrimaryStat::Defense => layout::DEFENSE,
            PrimaryStat::Power => layout::POWER,
            PrimaryStat::Knowledge => layout::KNOWLEDGE,
        }
    }
}

impl fmt::Display for PrimaryStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimaryStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimaryStat::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown primary attribute: {}", s))
    }
}

/// Editable hero statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub attack: u8,
    pub defense: u8,
    pub power: u8,
    pub knowledge: u8,
    pub experience: u32,
    pub level: u8,
    pub mana: u16,
}

impl Stats {
    pub(super) fn parse(bytes: &[u8]) -> Self {
        Stats {
            attack: bytes[layout::ATTACK],
            defense: bytes[layout::DEFENSE],
            power: bytes[layout::POWER],
            knowledge: bytes[layout::KNOWLEDGE],
            experience: layout::read_u32(bytes, layout::EXPERIENCE),
            level: bytes[layout::LEVEL],
            mana: layout::read_u16(bytes, layout::MANA),
        }
    }

    /// Write fields that differ from `old`
    pub(super) fn write(&self, old: &Stats, bytes: &mut [u8]) {
        for stat in PrimaryStat::ALL {
            if self.primary(stat) != old.primary(stat) {
                bytes[stat.offset()] = self.primary(stat);
            }
        }
        if self.experience != old.experience {
            layout::write_u32(bytes, layout::EXPERIENCE, self.experience);
        }
        if self.level != old.level {
            bytes[layout::LEVEL] = self.level;
        }
        if self.mana != old.mana {
            layout::write_u16(bytes, layout::MANA, self.mana);
        }
    }

    pub fn primary(&self, stat: PrimaryStat) -> u8 {
        match stat {
            PrimaryStat::Attack => self.attack,
            PrimaryStat::Defense => self.defense,
            PrimaryStat::Power => self.power,
            PrimaryStat::Knowledge => self.knowledge,
        }
    }

    pub fn set_primary(&mut self, stat: PrimaryStat, value: u8) {
        match stat {
            PrimaryStat::Attack => self.attack = value,
            PrimaryStat::Defense => self.defense = value,
            PrimaryStat::Power => self.power = value,
            PrimaryStat::Knowledge => self.knowledge = value,
        }
    }

    /// Swap one artifact's attribute contribution for another's
    ///
    /// Artifact bonuses are stored inside the primary attributes, so the
    /// difference is applied directly and the result clamped to 0..=99.
    pub fn swap_bonus(&mut self, removed: PrimaryBonus, added: PrimaryBonus) {
        for (i, stat) in PrimaryStat::ALL.into_iter().enumerate() {
            let diff = i16::from(added.0[i]) - i16::from(removed.0[i]);
            if diff == 0 {
                continue;
            }
            let value = (i16::from(self.primary(stat)) + diff).clamp(0, i16::from(PRIMARY_MAX));
            self.set_primary(stat, value as u8);
        }
    }
}

/// Movement points, maintained by the game and never written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub total: u32,
    pub left: u32,
}

impl Movement {
    pub(super) fn parse(bytes: &[u8]) -> Self {
        Movement {
            total: layout::read_u32(bytes, layout::MOVEMENT_TOTAL),
            left: layout::read_u32(bytes, layout::MOVEMENT_LEFT),
        }
    }
}
