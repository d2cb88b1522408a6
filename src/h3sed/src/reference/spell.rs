//! Spell definitions

use std::ops::BitOr;

/// Magic schools a spell belongs to, as a bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schools(u8);

impl Schools {
    pub const AIR: Schools = Schools(0b0001);
    pub const EARTH: Schools = Schools(0b0010);
    pub const FIRE: Schools = Schools(0b0100);
    pub const WATER: Schools = Schools(0b1000);
    pub const ALL: Schools = Schools(0b1111);

    /// Whether any school in `other` is also in `self`
    pub const fn intersects(self, other: Schools) -> bool {
        self.0 & other.0 != 0
    }

    pub fn names(self) -> Vec<&'static str> {
        [
            (Schools::AIR, "Air"),
            (Schools::EARTH, "Earth"),
            (Schools::FIRE, "Fire"),
            (Schools::WATER, "Water"),
        ]
        .into_iter()
        .filter(|(school, _)| self.intersects(*school))
        .map(|(_, name)| name)
        .collect()
    }
}

impl BitOr for Schools {
    type Output = Schools;

    fn bitor(self, rhs: Schools) -> Schools {
        Schools(self.0 | rhs.0)
    }
}

/// Spell information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spell {
    pub id: u8,
    pub name: &'static str,
    pub level: u8,
    pub schools: Schools,
    /// Only obtainable from an artifact, never learned or granted by school
    pub special: bool,
}

impl Spell {
    const fn new(id: u8, name: &'static str, level: u8, schools: Schools) -> Self {
        Spell {
            id,
            name,
            level,
            schools,
            special: false,
        }
    }

    const fn special(id: u8, name: &'static str, level: u8, schools: Schools) -> Self {
        Spell {
            id,
            name,
            level,
            schools,
            special: true,
        }
    }
}

/// All spells, indexed by savefile id
pub const SPELLS: &[Spell] = &[
    Spell::new(0, "Summon Boat", 1, Schools::WATER),
    Spell::new(1, "Scuttle Boat", 2, Schools::WATER),
    Spell::new(2, "Visions", 2, Schools::ALL),
    Spell::new(3, "View Earth", 1, Schools::EARTH),
    Spell::new(4, "Disguise", 2, Schools::AIR),
    Spell::new(5, "View Air", 1, Schools::AIR),
    Spell::new(6, "Fly", 5, Schools::AIR),
    Spell::new(7, "Water Walk", 4, Schools::WATER),
    Spell::new(8, "Dimension Door", 5, Schools::AIR),
    Spell::new(9, "Town Portal", 4, Schools::EARTH),
    Spell::new(10, "Quicksand", 2, Schools::EARTH),
    Spell::new(11, "Land Mine", 3, Schools::FIRE),
    Spell::new(12, "Force Field", 3, Schools::EARTH),
    Spell::new(13, "Fire Wall", 2, Schools::FIRE),
    Spell::new(14, "Earthquake", 3, Schools::EARTH),
    Spell::new(15, "Magic Arrow", 1, Schools::ALL),
    Spell::new(16, "Ice Bolt", 2, Schools::WATER),
    Spell::new(17, "Lightning Bolt", 2, Schools::AIR),
    Spell::new(18, "Implosion", 5, Schools::EARTH),
    Spell::new(19, "Chain Lightning", 4, Schools::AIR),
    Spell::new(20, "Frost Ring", 3, Schools::WATER),
    Spell::new(21, "Fireball", 3, Schools::FIRE),
    Spell::new(22, "Inferno", 4, Schools::FIRE),
    Spell::new(23, "Meteor Shower", 4, Schools::EARTH),
    Spell::new(24, "Death Ripple", 2, Schools::EARTH),
    Spell::new(25, "Destroy Undead", 3, Schools::AIR),
    Spell::new(26, "Armageddon", 4, Schools::FIRE),
    Spell::new(27, "Shield", 1, Schools::EARTH),
    Spell::new(28, "Air Shield", 3, Schools::AIR),
    Spell::new(29, "Fire Shield", 4, Schools::FIRE),
    Spell::new(30, "Protection from Air", 2, Schools::FIRE),
    Spell::new(31, "Protection from Fire", 3, Schools::WATER),
    Spell::new(32, "Protection from Water", 3, Schools::FIRE),
    Spell::new(33, "Protection from Earth", 4, Schools::AIR),
    Spell::new(34, "Anti-Magic", 3, Schools::EARTH),
    Spell::new(35, "Dispel", 1, Schools::WATER),
    Spell::new(36, "Magic Mirror", 5, Schools::WATER),
    Spell::new(37, "Cure", 1, Schools::WATER),
    Spell::new(38, "Resurrection", 4, Schools::EARTH),
    Spell::new(39, "Animate Dead", 3, Schools::EARTH),
    Spell::new(40, "Sacrifice", 5, Schools::FIRE),
    Spell::new(41, "Bless", 1, Schools::WATER),
    Spell::new(42, "Curse", 1, Schools::FIRE),
    Spell::new(43, "Bloodlust", 1, Schools::FIRE),
    Spell::new(44, "Precision", 2, Schools::AIR),
    Spell::new(45, "Weakness", 2, Schools::WATER),
    Spell::new(46, "Stone Skin", 1, Schools::EARTH),
    Spell::new(47, "Disrupting Ray", 2, Schools::AIR),
    Spell::new(48, "Prayer", 4, Schools::WATER),
    Spell::new(49, "Mirth", 3, Schools::WATER),
    Spell::new(50, "Sorrow", 4, Schools::EARTH),
    Spell::new(51, "Fortune", 2, Schools::AIR),
    Spell::new(52, "Misfortune", 3, Schools::FIRE),
    Spell::new(53, "Haste", 1, Schools::AIR),
    Spell::new(54, "Slow", 1, Schools::EARTH),
    Spell::new(55, "Slayer", 4, Schools::FIRE),
    Spell::new(56, "Frenzy", 4, Schools::FIRE),
    Spell::special(57, "Titan's Lightning Bolt", 5, Schools::AIR),
    Spell::new(58, "Counterstrike", 4, Schools::AIR),
    Spell::new(59, "Berserk", 4, Schools::FIRE),
    Spell::new(60, "Hypnotize", 3, Schools::AIR),
    Spell::new(61, "Forgetfulness", 2, Schools::WATER),
    Spell::new(62, "Blind", 2, Schools::FIRE),
    Spell::new(63, "Teleport", 3, Schools::WATER),
    Spell::new(64, "Remove Obstacle", 2, Schools::WATER),
    Spell::new(65, "Clone", 4, Schools::WATER),
    Spell::new(66, "Fire Elemental", 5, Schools::FIRE),
    Spell::new(67, "Earth Elemental", 5, Schools::EARTH),
    Spell::new(68, "Water Elemental", 5, Schools::WATER),
    Spell::new(69, "Air Elemental", 5, Schools::AIR),
];

/// Get spell by savefile id
pub fn spell_by_id(id: u8) -> Option<&'static Spell> {
    SPELLS.get(id as usize)
}

/// Get spell by name (case-insensitive)
pub fn spell_by_name(name: &str) -> Option<&'static Spell> {
    let name = name.trim();
    SPELLS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Spells a hero can learn into a spellbook
///
/// Every edition shares the same spell list; artifact-only spells are left out.
pub fn spells_for() -> impl Iterator<Item = &'static Spell> {
    SPELLS.iter().filter(|s| !s.special)
}
