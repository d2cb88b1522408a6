//! Secondary skill definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Secondary skill information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub id: u8,
    pub name: &'static str,
}

/// Secondary skill mastery
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Basic = 1,
    Advanced = 2,
    Expert = 3,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [SkillLevel::Basic, SkillLevel::Advanced, SkillLevel::Expert];

    /// Decode a stored level byte; 0 means the skill is not learned
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            1 => Some(SkillLevel::Basic),
            2 => Some(SkillLevel::Advanced),
            3 => Some(SkillLevel::Expert),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillLevel::Basic => "Basic",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return SkillLevel::from_byte(n).ok_or_else(|| format!("Skill level out of range: {}", n));
        }
        SkillLevel::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown skill level: {}", s))
    }
}

/// All secondary skills, indexed by savefile id
pub const SKILLS: &[Skill] = &[
    Skill { id: 0, name: "Pathfinding" },
    Skill { id: 1, name: "Archery" },
    Skill { id: 2, name: "Logistics" },
    Skill { id: 3, name: "Scouting" },
    Skill { id: 4, name: "Diplomacy" },
    Skill { id: 5, name: "Navigation" },
    Skill { id: 6, name: "Leadership" },
    Skill { id: 7, name: "Wisdom" },
    Skill { id: 8, name: "Mysticism" },
    Skill { id: 9, name: "Luck" },
    Skill { id: 10, name: "Ballistics" },
    Skill { id: 11, name: "Eagle Eye" },
    Skill { id: 12, name: "Necromancy" },
    Skill { id: 13, name: "Estates" },
    Skill { id: 14, name: "Fire Magic" },
    Skill { id: 15, name: "Air Magic" },
    Skill { id: 16, name: "Water Magic" },
    Skill { id: 17, name: "Earth Magic" },
    Skill { id: 18, name: "Scholar" },
    Skill { id: 19, name: "Tactics" },
    Skill { id: 20, name: "Artillery" },
    Skill { id: 21, name: "Learning" },
    Skill { id: 22, name: "Offense" },
    Skill { id: 23, name: "Armorer" },
    Skill { id: 24, name: "Intelligence" },
    Skill { id: 25, name: "Sorcery" },
    Skill { id: 26, name: "Resistance" },
    Skill { id: 27, name: "First Aid" },
];

/// Get skill by savefile id
pub fn skill_by_id(id: u8) -> Option<&'static Skill> {
    SKILLS.get(id as usize)
}

/// Get skill by name (case-insensitive)
pub fn skill_by_name(name: &str) -> Option<&'static Skill> {
    let name = name.trim();
    SKILLS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
