//! Hero records
//!
//! A hero is decoded from a fixed-length record located by the edition's
//! extraction rules. Each hero remembers the bytes and state it had when
//! loaded, so that serializing rewrites only the sections that were edited
//! and leaves everything else byte-identical.

mod army;
mod artifacts;
mod inventory;
pub mod layout;
mod skills;
mod spells;
mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use army::{stack_count, ArmySlot, Troop};
pub use artifacts::{Equipment, Overflow, WornSlot};
pub use inventory::Item;
pub use skills::SkillEntry;
pub use spells::resolve_available;
pub use stats::{Movement, PrimaryStat, Stats, PRIMARY_MAX};

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use crate::edition::{Edition, RecordMatch};
use layout::ARMY_SLOTS;

/// A problem found while decoding part of a hero
///
/// The hero is still indexed; the offending field keeps its raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub hero: String,
    pub place: usize,
    pub field: String,
    pub message: String,
}

impl ParseWarning {
    pub(crate) fn new(field: impl Into<String>, message: String) -> Self {
        ParseWarning {
            hero: String::new(),
            place: 0,
            field: field.into(),
            message,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}): {}: {}",
            self.hero, self.place, self.field, self.message
        )
    }
}

/// User-editable hero state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroState {
    pub stats: Stats,
    /// Learned skills in slot order
    pub skills: Vec<SkillEntry>,
    pub army: [ArmySlot; ARMY_SLOTS],
    pub artifacts: Equipment,
    pub inventory: Vec<Option<Item>>,
    /// Spells in the spellbook
    pub spells: BTreeSet<u8>,
    /// Spells castable, from the spellbook and from worn artifacts
    pub available: BTreeSet<u8>,
}

impl HeroState {
    /// Decode state from a hero record
    pub fn parse(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> Self {
        HeroState {
            stats: Stats::parse(bytes),
            skills: skills::parse(bytes, warnings),
            army: army::parse(bytes, warnings),
            artifacts: artifacts::parse(bytes, warnings),
            inventory: inventory::parse(bytes, warnings),
            spells: spells::parse_book(bytes),
            available: spells::parse_available(bytes),
        }
    }

    /// Recompute castable spells; returns whether they changed
    pub fn refresh_available(&mut self, banned: &BTreeSet<u8>) -> bool {
        let granted = self.artifacts.granted_spells();
        let available = resolve_available(&self.spells, &granted, banned);
        if available == self.available {
            return false;
        }
        self.available = available;
        true
    }

    /// Names of the categories that differ from another state
    pub fn changed_categories(&self, other: &HeroState) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.stats != other.stats {
            changed.push("stats");
        }
        if self.skills != other.skills {
            changed.push("skills");
        }
        if self.army != other.army {
            changed.push("army");
        }
        if self.artifacts != other.artifacts {
            changed.push("artifacts");
        }
        if self.inventory != other.inventory {
            changed.push("inventory");
        }
        if self.spells != other.spells || self.available != other.available {
            changed.push("spells");
        }
        changed
    }
}

/// A hero located in the savefile
#[derive(Debug, Clone)]
pub struct Hero {
    pub name: String,
    /// Ordinal of the record among all matches in the file
    pub place: usize,
    /// Byte range of the record in the raw game state
    pub span: Range<usize>,
    /// Read-only; reflects the last values the game wrote
    pub movement: Movement,
    pub state: HeroState,
    state0: HeroState,
    bytes0: Vec<u8>,
}

impl Hero {
    /// Decode a located hero record
    pub fn parse(record: &RecordMatch, place: usize, raw: &[u8]) -> (Hero, Vec<ParseWarning>) {
        let bytes = &raw[record.span.clone()];
        let mut warnings = Vec::new();
        let state = HeroState::parse(bytes, &mut warnings);
        for warning in &mut warnings {
            warning.hero = record.name.clone();
            warning.place = place;
        }

        let hero = Hero {
            name: record.name.clone(),
            place,
            span: record.span.clone(),
            movement: Movement::parse(bytes),
            state0: state.clone(),
            state,
            bytes0: bytes.to_vec(),
        };
        (hero, warnings)
    }

    /// Encode the hero record
    ///
    /// Starts from the bytes read at load and rewrites only the sections
    /// whose state differs from the loaded state. Movement points are never
    /// written.
    pub fn serialize(&self, edition: Edition) -> Vec<u8> {
        let mut bytes = self.bytes0.clone();
        let (state, state0) = (&self.state, &self.state0);

        state.stats.write(&state0.stats, &mut bytes);
        if state.skills != state0.skills {
            skills::write(&state.skills, &mut bytes);
        }
        army::write(&state.army, &state0.army, &mut bytes);
        if state.spells != state0.spells {
            spells::write_book(&state.spells, &mut bytes);
        }
        if state.available != state0.available {
            spells::write_available(&state.available, &mut bytes);
        }
        artifacts::write(
            &state.artifacts,
            &state0.artifacts,
            edition.has_combinations(),
            &mut bytes,
        );
        inventory::write(&state.inventory, &state0.inventory, &mut bytes);
        bytes
    }

    /// State as decoded at load or at the last save
    pub fn original(&self) -> &HeroState {
        &self.state0
    }

    /// Whether the hero differs from its loaded state
    pub fn is_modified(&self) -> bool {
        self.state != self.state0
    }

    /// Re-read the editable state from current raw content
    pub(crate) fn reparse(&mut self, raw: &[u8]) -> Vec<ParseWarning> {
        let bytes = &raw[self.span.clone()];
        let mut warnings = Vec::new();
        self.state = HeroState::parse(bytes, &mut warnings);
        self.movement = Movement::parse(bytes);
        for warning in &mut warnings {
            warning.hero = self.name.clone();
            warning.place = self.place;
        }
        warnings
    }

    /// Adopt current raw content as the new baseline, after a save
    pub(crate) fn rebase(&mut self, raw: &[u8]) {
        self.bytes0 = raw[self.span.clone()].to_vec();
        self.state0 = self.state.clone();
        self.movement = Movement::parse(&self.bytes0);
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::testing::{padded_raw, RecordBuilder};
    use crate::reference::SkillLevel;

    fn parse_one(record: &[u8]) -> (Hero, Vec<ParseWarning>, Vec<u8>) {
        let raw = padded_raw(&[&record.to_vec()]);
        let found = Edition::Sod.rules().find_records(&raw);
        assert_eq!(found.len(), 1);
        let (hero, warnings) = Hero::parse(&found[0], 0, &raw);
        (hero, warnings, raw)
    }

    #[test]
    fn test_parse_fields() {
        let record = RecordBuilder::new("Gelu")
            .movement(1500, 700)
            .primary([5, 4, 3, 2])
            .experience(12_000)
            .level(9)
            .mana(30)
            .troop(0, 92, 6)
            .skill(7, SkillLevel::Expert)
            .worn(WornSlot::Spellbook, 0)
            .worn(WornSlot::Weapon, 7)
            .spell(53)
            .carry(3, Item::Scroll(15))
            .build();
        let (hero, warnings, _) = parse_one(&record);

        assert!(warnings.is_empty());
        assert_eq!(hero.name, "Gelu");
        assert_eq!(hero.movement, Movement { total: 1500, left: 700 });
        assert_eq!(hero.state.stats.attack, 5);
        assert_eq!(hero.state.stats.experience, 12_000);
        assert_eq!(hero.state.army[0], Some(Troop { creature: 92, count: 6 }));
        assert_eq!(hero.state.skills.len(), 1);
        assert!(hero.state.artifacts.has_spellbook());
        assert!(hero.state.spells.contains(&53));
        assert!(hero.state.available.contains(&53));
        assert_eq!(hero.state.inventory[3], Some(Item::Scroll(15)));
    }

    #[test]
    fn test_unedited_round_trip() {
        let record = RecordBuilder::new("Crag Hack")
            .troop(1, 13, 2)
            .zero_filled_army(4)
            .worn(WornSlot::Weapon, 129)
            .reserved(crate::reference::SlotCategory::Helm, 1)
            .build();
        let (hero, _, _) = parse_one(&record);
        assert_eq!(hero.serialize(Edition::Sod), record);
    }

    #[test]
    fn test_edit_touches_only_section() {
        let record = RecordBuilder::new("Gelu").movement(1500, 700).build();
        let (mut hero, _, _) = parse_one(&record);
        hero.state.stats.knowledge = 40;
        hero.movement.total = 1;

        let bytes = hero.serialize(Edition::Sod);
        let diff: Vec<usize> = (0..bytes.len()).filter(|&i| bytes[i] != record[i]).collect();
        assert_eq!(diff, vec![layout::KNOWLEDGE]);
        assert!(hero.is_modified());
    }

    #[test]
    fn test_unknown_ids_warn() {
        let record = RecordBuilder::new("Gelu").troop(2, 9999, 1).build();
        let (hero, warnings, _) = parse_one(&record);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].hero, "Gelu");
        assert_eq!(warnings[0].field, "army[2]");
        assert_eq!(hero.state.army[2].map(|t| t.creature), Some(9999));
    }

    #[test]
    fn test_refresh_available() {
        let mut state = HeroState::parse(&RecordBuilder::new("Gelu").build(), &mut Vec::new());
        state.artifacts.set(WornSlot::Weapon, Some(Item::Artifact(128)));
        let banned = BTreeSet::from([26]);
        assert!(!state.refresh_available(&banned));
        assert!(state.refresh_available(&BTreeSet::new()));
        assert_eq!(state.available, BTreeSet::from([26]));
    }
}
