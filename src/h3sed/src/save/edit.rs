//! Field paths and single-field edits
//!
//! Paths address one editable value of a hero, e.g. `stats.attack`,
//! `army[2]`, `artifacts.side1`, `skills.Wisdom` or `spells.Haste`.

use std::fmt;
use std::str::FromStr;

use super::SaveError;
use crate::edition::Edition;
use crate::hero::{
    stack_count, Equipment, HeroState, Item, PrimaryStat, Stats, Troop, WornSlot, PRIMARY_MAX,
};
use crate::hero::{layout, SkillEntry};
use crate::mapconfig::Bans;
use crate::reference::{self, Artifact, SkillLevel};

/// Highest hero level accepted
pub const LEVEL_MAX: u64 = 75;

/// Secondary skills a hero can hold
pub const SKILLS_MAX: usize = 8;

/// Address of a single hero field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Name,
    MovementTotal,
    MovementLeft,
    Primary(PrimaryStat),
    Experience,
    Level,
    Mana,
    Skill(u8),
    Army(usize),
    Artifact(WornSlot),
    Inventory(usize),
    Spell(u8),
}

impl FieldPath {
    /// Whether the field is derived by the game or identifies the hero
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            FieldPath::Name | FieldPath::MovementTotal | FieldPath::MovementLeft
        )
    }

    /// Hero category the field belongs to
    pub fn category(&self) -> &'static str {
        match self {
            FieldPath::Name => "name",
            FieldPath::MovementTotal | FieldPath::MovementLeft => "movement",
            FieldPath::Primary(_) | FieldPath::Experience | FieldPath::Level | FieldPath::Mana => {
                "stats"
            }
            FieldPath::Skill(_) => "skills",
            FieldPath::Army(_) => "army",
            FieldPath::Artifact(_) => "artifacts",
            FieldPath::Inventory(_) => "inventory",
            FieldPath::Spell(_) => "spells",
        }
    }
}

/// Split `name[3]` into `("name", 3)`
fn indexed(path: &str) -> Option<(&str, &str)> {
    let (name, rest) = path.split_once('[')?;
    Some((name, rest.strip_suffix(']')?))
}

fn parse_index(path: &str, raw: &str, len: usize) -> Result<usize, SaveError> {
    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| SaveError::UnknownField(path.to_string()))?;
    if index >= len {
        return Err(SaveError::SlotIndex { index, len });
    }
    Ok(index)
}

impl FromStr for FieldPath {
    type Err = SaveError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let unknown = || SaveError::UnknownField(trimmed.to_string());

        if let Some((name, index)) = indexed(trimmed) {
            return match name.to_ascii_lowercase().as_str() {
                "army" => Ok(FieldPath::Army(parse_index(
                    trimmed,
                    index,
                    layout::ARMY_SLOTS,
                )?)),
                "inventory" => Ok(FieldPath::Inventory(parse_index(
                    trimmed,
                    index,
                    layout::INVENTORY_SLOTS,
                )?)),
                _ => Err(unknown()),
            };
        }

        let (head, tail) = match trimmed.split_once('.') {
            Some((head, tail)) => (head.to_ascii_lowercase(), Some(tail)),
            None => (trimmed.to_ascii_lowercase(), None),
        };
        match (head.as_str(), tail) {
            ("name", None) => Ok(FieldPath::Name),
            ("movement", Some(t)) if t.eq_ignore_ascii_case("total") => Ok(FieldPath::MovementTotal),
            ("movement", Some(t)) if t.eq_ignore_ascii_case("left") => Ok(FieldPath::MovementLeft),
            ("stats", Some(field)) => match field.to_ascii_lowercase().as_str() {
                "experience" => Ok(FieldPath::Experience),
                "level" => Ok(FieldPath::Level),
                "mana" => Ok(FieldPath::Mana),
                other => other.parse().map(FieldPath::Primary).map_err(|_| unknown()),
            },
            ("skills", Some(name)) => reference::skill_by_name(name)
                .map(|s| FieldPath::Skill(s.id))
                .ok_or_else(unknown),
            ("artifacts", Some(slot)) => slot.parse().map(FieldPath::Artifact).map_err(|_| unknown()),
            ("spells", Some(name)) => reference::spell_by_name(name)
                .map(|s| FieldPath::Spell(s.id))
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => f.write_str("name"),
            FieldPath::MovementTotal => f.write_str("movement.total"),
            FieldPath::MovementLeft => f.write_str("movement.left"),
            FieldPath::Primary(stat) => write!(f, "stats.{}", stat),
            FieldPath::Experience => f.write_str("stats.experience"),
            FieldPath::Level => f.write_str("stats.level"),
            FieldPath::Mana => f.write_str("stats.mana"),
            FieldPath::Skill(id) => {
                let name = reference::skill_by_id(*id).map_or("?", |s| s.name);
                write!(f, "skills.{}", name)
            }
            FieldPath::Army(i) => write!(f, "army[{}]", i),
            FieldPath::Artifact(slot) => write!(f, "artifacts.{}", slot),
            FieldPath::Inventory(i) => write!(f, "inventory[{}]", i),
            FieldPath::Spell(id) => write!(f, "spells.{}", reference::spell_label(*id)),
        }
    }
}

/// A typed field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Empty,
    Number(u64),
    Text(String),
    Bool(bool),
    Skill(SkillLevel),
    Troop(Troop),
    Item(Item),
}

impl FieldValue {
    /// Parse a user-supplied string into the value type the field takes
    ///
    /// An empty string clears army, skill, artifact and inventory slots.
    pub fn parse(path: &FieldPath, raw: &str) -> Result<Self, SaveError> {
        let raw = raw.trim();
        let invalid = |reason: String| SaveError::InvalidValue {
            field: path.to_string(),
            reason,
        };
        let clearable = matches!(
            path,
            FieldPath::Skill(_) | FieldPath::Army(_) | FieldPath::Artifact(_) | FieldPath::Inventory(_)
        );
        if raw.is_empty() && clearable {
            return Ok(FieldValue::Empty);
        }

        match path {
            FieldPath::Name => Ok(FieldValue::Text(raw.to_string())),
            FieldPath::MovementTotal
            | FieldPath::MovementLeft
            | FieldPath::Primary(_)
            | FieldPath::Experience
            | FieldPath::Level
            | FieldPath::Mana => raw
                .parse()
                .map(FieldValue::Number)
                .map_err(|_| invalid(format!("'{}' is not a number", raw))),
            FieldPath::Skill(_) => raw.parse().map(FieldValue::Skill).map_err(invalid),
            FieldPath::Army(_) => Troop::from_label(raw).map(FieldValue::Troop).map_err(invalid),
            FieldPath::Artifact(_) | FieldPath::Inventory(_) => Item::from_label(raw)
                .map(FieldValue::Item)
                .ok_or_else(|| invalid(format!("unknown artifact '{}'", raw))),
            FieldPath::Spell(_) => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(FieldValue::Bool(true)),
                "false" | "no" | "0" => Ok(FieldValue::Bool(false)),
                _ => Err(invalid(format!("'{}' is not a boolean", raw))),
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Skill(level) => write!(f, "{}", level),
            FieldValue::Troop(troop) => write!(f, "{}", troop),
            FieldValue::Item(item) => write!(f, "{}", item),
        }
    }
}

/// Edition and map restrictions an edit must respect
#[derive(Debug, Clone, Copy)]
pub struct EditRules<'a> {
    pub edition: Edition,
    pub bans: &'a Bans,
}

impl EditRules<'_> {
    fn unknown(&self, kind: &'static str, name: impl Into<String>) -> SaveError {
        SaveError::UnknownName {
            kind,
            name: name.into(),
            edition: self.edition,
        }
    }

    pub(crate) fn check_creature(&self, troop: &Troop) -> Result<(), SaveError> {
        match reference::creature_by_id(troop.creature) {
            Some(c) if reference::available_in(c.since, self.edition) => Ok(()),
            Some(c) => Err(self.unknown("creature", c.name)),
            None => Err(self.unknown("creature", troop.name())),
        }
    }

    /// Catalog entry for an item, checked against edition and map bans
    pub(crate) fn check_item(&self, item: Item) -> Result<&'static Artifact, SaveError> {
        let artifact = item
            .artifact()
            .ok_or_else(|| self.unknown("artifact", item.to_string()))?;
        if !reference::available_in(artifact.since, self.edition) {
            return Err(self.unknown("artifact", artifact.name));
        }
        if self.bans.artifacts.contains(&artifact.id) {
            return Err(SaveError::Banned(artifact.name.to_string()));
        }
        if let Item::Scroll(spell) = item {
            if reference::spell_by_id(spell).is_none() {
                return Err(self.unknown("spell", item.to_string()));
            }
        }
        Ok(artifact)
    }

    /// Check an item may be worn in a slot, apart from slot availability
    pub(crate) fn check_wearable(&self, slot: WornSlot, item: Item) -> Result<(), SaveError> {
        let artifact = self.check_item(item)?;
        if artifact.slot != slot.category() {
            return Err(SaveError::InvalidValue {
                field: FieldPath::Artifact(slot).to_string(),
                reason: format!("{} is worn in the {} slot", artifact.name, artifact.slot),
            });
        }
        if artifact.is_combination() && !self.edition.has_combinations() {
            return Err(self.unknown("artifact", artifact.name));
        }
        Ok(())
    }
}

fn in_range(path: &FieldPath, value: u64, max: u64) -> Result<u64, SaveError> {
    if value > max {
        return Err(SaveError::InvalidValue {
            field: path.to_string(),
            reason: format!("{} is out of range 0..={}", value, max),
        });
    }
    Ok(value)
}

fn type_mismatch(path: &FieldPath, value: &FieldValue) -> SaveError {
    SaveError::InvalidValue {
        field: path.to_string(),
        reason: format!("unexpected value '{}'", value),
    }
}

/// Apply one field edit to a hero state
///
/// On error the state is left unchanged.
pub(crate) fn apply(
    state: &mut HeroState,
    path: &FieldPath,
    value: FieldValue,
    rules: &EditRules,
) -> Result<(), SaveError> {
    if path.is_read_only() {
        return Err(SaveError::FieldWriteRejected(path.to_string()));
    }

    match (path, value) {
        (FieldPath::Primary(stat), FieldValue::Number(n)) => {
            let n = in_range(path, n, u64::from(PRIMARY_MAX))?;
            state.stats.set_primary(*stat, n as u8);
        }
        (FieldPath::Experience, FieldValue::Number(n)) => {
            state.stats.experience = in_range(path, n, u64::from(u32::MAX))? as u32;
        }
        (FieldPath::Level, FieldValue::Number(n)) => {
            if n == 0 {
                return Err(SaveError::InvalidValue {
                    field: path.to_string(),
                    reason: "level must be at least 1".to_string(),
                });
            }
            state.stats.level = in_range(path, n, LEVEL_MAX)? as u8;
        }
        (FieldPath::Mana, FieldValue::Number(n)) => {
            state.stats.mana = in_range(path, n, u64::from(u16::MAX))? as u16;
        }
        (FieldPath::Skill(skill), value) => set_skill(state, *skill, value, path)?,
        (FieldPath::Army(i), FieldValue::Empty) => {
            if state.army[*i].is_some() && stack_count(&state.army) == 1 {
                return Err(SaveError::InvalidValue {
                    field: path.to_string(),
                    reason: "a hero must keep at least one army stack".to_string(),
                });
            }
            state.army[*i] = None;
        }
        (FieldPath::Army(i), FieldValue::Troop(troop)) => {
            rules.check_creature(&troop)?;
            state.army[*i] = Some(troop);
        }
        (FieldPath::Artifact(slot), FieldValue::Empty) => equip(state, *slot, None, rules)?,
        (FieldPath::Artifact(slot), FieldValue::Item(item)) => {
            equip(state, *slot, Some(item), rules)?
        }
        (FieldPath::Inventory(i), FieldValue::Empty) => state.inventory[*i] = None,
        (FieldPath::Inventory(i), FieldValue::Item(item)) => {
            let artifact = rules.check_item(item)?;
            if !artifact.fits_inventory() {
                return Err(SaveError::InvalidValue {
                    field: path.to_string(),
                    reason: format!("{} cannot be carried in the backpack", artifact.name),
                });
            }
            state.inventory[*i] = Some(item);
        }
        (FieldPath::Spell(spell), FieldValue::Bool(learned)) => {
            set_spell(state, *spell, learned, path)?;
            state.refresh_available(&rules.bans.spells);
        }
        (path, value) => return Err(type_mismatch(path, &value)),
    }
    Ok(())
}

fn set_skill(
    state: &mut HeroState,
    skill: u8,
    value: FieldValue,
    path: &FieldPath,
) -> Result<(), SaveError> {
    let current = state.skills.iter().position(|s| s.skill == skill);
    match (value, current) {
        (FieldValue::Empty, Some(i)) => {
            state.skills.remove(i);
        }
        (FieldValue::Empty, None) => {}
        (FieldValue::Skill(level), Some(i)) => state.skills[i].level = level,
        (FieldValue::Skill(level), None) => {
            if state.skills.len() >= SKILLS_MAX {
                return Err(SaveError::SlotIndex {
                    index: state.skills.len(),
                    len: SKILLS_MAX,
                });
            }
            state.skills.push(SkillEntry { skill, level });
        }
        (value, _) => return Err(type_mismatch(path, &value)),
    }
    Ok(())
}

fn set_spell(
    state: &mut HeroState,
    spell: u8,
    learned: bool,
    path: &FieldPath,
) -> Result<(), SaveError> {
    if !learned {
        state.spells.remove(&spell);
        return Ok(());
    }
    if !state.artifacts.has_spellbook() {
        return Err(SaveError::NoSpellbook);
    }
    if reference::spell_by_id(spell).map_or(true, |s| s.special) {
        return Err(SaveError::InvalidValue {
            field: path.to_string(),
            reason: "spell cannot be learned into a spellbook".to_string(),
        });
    }
    state.spells.insert(spell);
    Ok(())
}

/// Reject equipment where worn artifacts need more slots than exist
pub(crate) fn check_slots(artifacts: &Equipment, item: Item) -> Result<(), SaveError> {
    let overflow = artifacts.overflow();
    if overflow.is_empty() {
        return Ok(());
    }
    let taken = overflow
        .iter()
        .map(|(category, owners)| format!("{} (by {})", category, owners.join(", ")))
        .collect::<Vec<_>>()
        .join("; ");
    Err(SaveError::SlotTaken {
        artifact: item.to_string(),
        taken,
    })
}

/// Validate statistics set as a whole
pub(crate) fn check_stats(stats: &Stats) -> Result<(), SaveError> {
    for stat in PrimaryStat::ALL {
        in_range(&FieldPath::Primary(stat), u64::from(stats.primary(stat)), u64::from(PRIMARY_MAX))?;
    }
    if stats.level == 0 {
        return Err(SaveError::InvalidValue {
            field: FieldPath::Level.to_string(),
            reason: "level must be at least 1".to_string(),
        });
    }
    in_range(&FieldPath::Level, u64::from(stats.level), LEVEL_MAX)?;
    Ok(())
}

/// Put an item on or take it off, keeping dependent state consistent
///
/// Rejects items that would need a slot reserved by a worn combination
/// artifact. Attribute bonuses move with the artifact, and taking off the
/// spellbook empties it.
pub(crate) fn equip(
    state: &mut HeroState,
    slot: WornSlot,
    item: Option<Item>,
    rules: &EditRules,
) -> Result<(), SaveError> {
    let current = state.artifacts.get(slot);
    if current == item {
        return Ok(());
    }
    if let Some(item) = item {
        rules.check_wearable(slot, item)?;
    }

    let mut artifacts = state.artifacts;
    artifacts.set(slot, item);
    if let Some(item) = item {
        check_slots(&artifacts, item)?;
    }

    let removed = state.artifacts.bonus(slot);
    state.artifacts = artifacts;
    state.stats.swap_bonus(removed, state.artifacts.bonus(slot));
    if !state.artifacts.has_spellbook() {
        state.spells.clear();
    }
    state.refresh_available(&rules.bans.spells);
    Ok(())
}

/// Read a field from a hero state
pub(crate) fn read(
    state: &HeroState,
    path: &FieldPath,
    name: &str,
    movement: &crate::hero::Movement,
) -> FieldValue {
    let optional = |item: Option<Item>| item.map_or(FieldValue::Empty, FieldValue::Item);
    match path {
        FieldPath::Name => FieldValue::Text(name.to_string()),
        FieldPath::MovementTotal => FieldValue::Number(u64::from(movement.total)),
        FieldPath::MovementLeft => FieldValue::Number(u64::from(movement.left)),
        FieldPath::Primary(stat) => FieldValue::Number(u64::from(state.stats.primary(*stat))),
        FieldPath::Experience => FieldValue::Number(u64::from(state.stats.experience)),
        FieldPath::Level => FieldValue::Number(u64::from(state.stats.level)),
        FieldPath::Mana => FieldValue::Number(u64::from(state.stats.mana)),
        FieldPath::Skill(skill) => state
            .skills
            .iter()
            .find(|s| s.skill == *skill)
            .map_or(FieldValue::Empty, |s| FieldValue::Skill(s.level)),
        FieldPath::Army(i) => state.army[*i].map_or(FieldValue::Empty, FieldValue::Troop),
        FieldPath::Artifact(slot) => optional(state.artifacts.get(*slot)),
        FieldPath::Inventory(i) => optional(state.inventory[*i]),
        FieldPath::Spell(spell) => FieldValue::Bool(state.spells.contains(spell)),
    }
}
