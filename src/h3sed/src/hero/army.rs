//! Hero army slots

use std::fmt;

use super::layout::{self, ARMY_COUNTS, ARMY_SLOTS, ARMY_TYPES};
use super::ParseWarning;
use crate::reference;

/// Creature stack in an army slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Troop {
    pub creature: u32,
    pub count: u32,
}

/// An army slot: empty, or one creature stack
pub type ArmySlot = Option<Troop>;

const EMPTY_TYPE: u32 = u32::MAX;

impl Troop {
    pub fn name(&self) -> String {
        reference::creature_label(self.creature)
    }

    /// Parse `Creature:count`, e.g. `Archangel:12`
    pub fn from_label(label: &str) -> Result<Self, String> {
        let (name, count) = label
            .rsplit_once(':')
            .ok_or_else(|| format!("Expected 'creature:count', got '{}'", label))?;
        let creature = reference::creature_by_name(name)
            .ok_or_else(|| format!("Unknown creature '{}'", name.trim()))?;
        let count: u32 = count
            .trim()
            .parse()
            .map_err(|_| format!("Invalid creature count '{}'", count.trim()))?;
        if count == 0 {
            return Err("Creature count must be at least 1".to_string());
        }
        Ok(Troop {
            creature: creature.id,
            count,
        })
    }
}

impl fmt::Display for Troop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name(), self.count)
    }
}

pub(super) fn parse(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> [ArmySlot; ARMY_SLOTS] {
    let mut army = [None; ARMY_SLOTS];
    for (i, slot) in army.iter_mut().enumerate() {
        let creature = layout::read_u32(bytes, ARMY_TYPES + i * 4);
        let count = layout::read_u32(bytes, ARMY_COUNTS + i * 4);
        if creature == EMPTY_TYPE || count == 0 {
            continue;
        }
        if reference::creature_by_id(creature).is_none() {
            warnings.push(ParseWarning::new(
                format!("army[{}]", i),
                format!("unknown creature id {}", creature),
            ));
        }
        *slot = Some(Troop { creature, count });
    }
    army
}

/// Rewrite changed army slots
///
/// A slot that was empty at load and is still empty keeps its bytes, since
/// the game fills empty slots with both 0x00 and 0xFF.
pub(super) fn write(state: &[ArmySlot], state0: &[ArmySlot], bytes: &mut [u8]) {
    for (i, (slot, slot0)) in state.iter().zip(state0).enumerate() {
        if slot == slot0 {
            continue;
        }
        let (creature, count) = match slot {
            Some(troop) => (troop.creature, troop.count),
            None => (EMPTY_TYPE, 0),
        };
        layout::write_u32(bytes, ARMY_TYPES + i * 4, creature);
        layout::write_u32(bytes, ARMY_COUNTS + i * 4, count);
    }
}

/// Number of occupied slots
pub fn stack_count(army: &[ArmySlot]) -> usize {
    army.iter().flatten().count()
}
