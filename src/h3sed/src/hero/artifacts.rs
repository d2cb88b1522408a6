//! Worn artifacts and combination slot accounting

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::inventory::{read_checked, write_cell, Item};
use super::layout::{self, CELL, EQUIPMENT, RESERVED};
use super::ParseWarning;
use crate::reference::{PrimaryBonus, SlotCategory};

/// Worn equipment cell, in savefile order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WornSlot {
    Helm,
    Cloak,
    Neck,
    Weapon,
    Shield,
    Armor,
    LeftHand,
    RightHand,
    Feet,
    Side1,
    Side2,
    Side3,
    Side4,
    Ballista,
    Ammo,
    Tent,
    Catapult,
    Spellbook,
    Side5,
}

impl WornSlot {
    pub const COUNT: usize = 19;

    pub const ALL: [WornSlot; WornSlot::COUNT] = [
        WornSlot::Helm,
        WornSlot::Cloak,
        WornSlot::Neck,
        WornSlot::Weapon,
        WornSlot::Shield,
        WornSlot::Armor,
        WornSlot::LeftHand,
        WornSlot::RightHand,
        WornSlot::Feet,
        WornSlot::Side1,
        WornSlot::Side2,
        WornSlot::Side3,
        WornSlot::Side4,
        WornSlot::Ballista,
        WornSlot::Ammo,
        WornSlot::Tent,
        WornSlot::Catapult,
        WornSlot::Spellbook,
        WornSlot::Side5,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset of the cell within the hero record
    pub fn offset(self) -> usize {
        EQUIPMENT + self.index() * CELL
    }

    pub fn name(self) -> &'static str {
        match self {
            WornSlot::Helm => "helm",
            WornSlot::Cloak => "cloak",
            WornSlot::Neck => "neck",
            WornSlot::Weapon => "weapon",
            WornSlot::Shield => "shield",
            WornSlot::Armor => "armor",
            WornSlot::LeftHand => "lefthand",
            WornSlot::RightHand => "righthand",
            WornSlot::Feet => "feet",
            WornSlot::Side1 => "side1",
            WornSlot::Side2 => "side2",
            WornSlot::Side3 => "side3",
            WornSlot::Side4 => "side4",
            WornSlot::Ballista => "ballista",
            WornSlot::Ammo => "ammo",
            WornSlot::Tent => "tent",
            WornSlot::Catapult => "catapult",
            WornSlot::Spellbook => "spellbook",
            WornSlot::Side5 => "side5",
        }
    }

    pub fn category(self) -> SlotCategory {
        match self {
            WornSlot::Helm => SlotCategory::Helm,
            WornSlot::Cloak => SlotCategory::Cloak,
            WornSlot::Neck => SlotCategory::Neck,
            WornSlot::Weapon => SlotCategory::Weapon,
            WornSlot::Shield => SlotCategory::Shield,
            WornSlot::Armor => SlotCategory::Armor,
            WornSlot::LeftHand | WornSlot::RightHand => SlotCategory::Hand,
            WornSlot::Feet => SlotCategory::Feet,
            WornSlot::Side1
            | WornSlot::Side2
            | WornSlot::Side3
            | WornSlot::Side4
            | WornSlot::Side5 => SlotCategory::Side,
            WornSlot::Ballista => SlotCategory::Ballista,
            WornSlot::Ammo => SlotCategory::Ammo,
            WornSlot::Tent => SlotCategory::Tent,
            WornSlot::Catapult => SlotCategory::Catapult,
            WornSlot::Spellbook => SlotCategory::Spellbook,
        }
    }
}

impl fmt::Display for WornSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WornSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WornSlot::ALL
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown equipment slot: {}", s))
    }
}

/// Slot categories over capacity, with the artifacts occupying them
pub type Overflow = Vec<(SlotCategory, Vec<&'static str>)>;

/// Worn artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Equipment([Option<Item>; WornSlot::COUNT]);

impl Equipment {
    pub fn get(&self, slot: WornSlot) -> Option<Item> {
        self.0[slot.index()]
    }

    pub fn set(&mut self, slot: WornSlot, item: Option<Item>) {
        self.0[slot.index()] = item;
    }

    /// Occupied slots with their items
    pub fn iter(&self) -> impl Iterator<Item = (WornSlot, Item)> + '_ {
        WornSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn has_spellbook(&self) -> bool {
        self.get(WornSlot::Spellbook).is_some()
    }

    /// Attribute contribution of an item in a slot
    pub fn bonus(&self, slot: WornSlot) -> PrimaryBonus {
        self.get(slot)
            .and_then(Item::artifact)
            .map_or(PrimaryBonus::NONE, |a| a.stats)
    }

    /// Spells granted by worn artifacts and scrolls
    pub fn granted_spells(&self) -> BTreeSet<u8> {
        let mut spells = BTreeSet::new();
        for (_, item) in self.iter() {
            match item {
                Item::Scroll(spell) => {
                    spells.insert(spell);
                }
                Item::Artifact(_) => {
                    if let Some(artifact) = item.artifact() {
                        spells.extend(artifact.grants.spell_ids());
                    }
                }
            }
        }
        spells
    }

    /// Free slot counts and the artifacts occupying each category
    fn usage(&self) -> (BTreeMap<SlotCategory, i32>, BTreeMap<SlotCategory, Vec<&'static str>>) {
        let mut free: BTreeMap<SlotCategory, i32> = BTreeMap::new();
        let mut owners: BTreeMap<SlotCategory, Vec<&'static str>> = BTreeMap::new();
        for slot in WornSlot::ALL {
            *free.entry(slot.category()).or_default() += 1;
        }
        for (slot, item) in self.iter() {
            let Some(artifact) = item.artifact() else {
                *free.entry(slot.category()).or_default() -= 1;
                continue;
            };
            let primary = [slot.category()];
            for &category in primary.iter().chain(artifact.extra_slots) {
                *free.entry(category).or_default() -= 1;
                let names = owners.entry(category).or_default();
                if !names.contains(&artifact.name) {
                    names.push(artifact.name);
                }
            }
        }
        (free, owners)
    }

    /// Categories where worn artifacts need more slots than exist
    pub fn overflow(&self) -> Overflow {
        let (free, mut owners) = self.usage();
        free.into_iter()
            .filter(|&(_, n)| n < 0)
            .map(|(category, _)| (category, owners.remove(&category).unwrap_or_default()))
            .collect()
    }

    /// Empty slots unusable because a combination artifact reserves them
    pub fn taken_slots(&self) -> Vec<(WornSlot, &'static str)> {
        let (mut free, owners) = self.usage();
        let mut taken = Vec::new();
        for slot in WornSlot::ALL {
            if self.get(slot).is_some() {
                continue;
            }
            let category = slot.category();
            let Some(names) = owners.get(&category) else {
                continue;
            };
            let remaining = free.entry(category).or_default();
            if *remaining > 0 {
                *remaining -= 1;
                continue;
            }
            let owner = names.iter().copied().find(|name| {
                crate::reference::artifact_by_name(name).map_or(false, |a| a.is_combination())
            });
            if let Some(owner) = owner {
                taken.push((slot, owner));
            }
        }
        taken
    }

    /// Reserved-slot counters in savefile order
    pub fn reserved_counts(&self) -> [u8; 9] {
        let mut counts = [0u8; 9];
        for (_, item) in self.iter() {
            let Some(artifact) = item.artifact() else {
                continue;
            };
            for category in artifact.extra_slots {
                if let Some(i) = SlotCategory::RESERVABLE.iter().position(|c| c == category) {
                    counts[i] += 1;
                }
            }
        }
        counts
    }
}

pub(super) fn parse(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> Equipment {
    let mut equipment = Equipment::default();
    for slot in WornSlot::ALL {
        let item = read_checked(bytes, slot.offset(), &format!("artifacts.{}", slot), warnings);
        equipment.set(slot, item);
    }
    equipment
}

/// Rewrite changed cells and, where combinations exist, the reserved counters
pub(super) fn write(
    state: &Equipment,
    state0: &Equipment,
    combinations: bool,
    bytes: &mut [u8],
) {
    if state == state0 {
        return;
    }
    for slot in WornSlot::ALL {
        if state.get(slot) != state0.get(slot) {
            write_cell(bytes, slot.offset(), state.get(slot));
        }
    }
    if combinations {
        let counts = state.reserved_counts();
        bytes[RESERVED..layout::RECORD_LEN].copy_from_slice(&counts);
    }
}
