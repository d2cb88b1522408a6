//! Savefile loading, editing and saving
//!
//! A [`Savefile`] holds the raw game state as loaded and as currently
//! patched. Every accepted edit re-encodes the affected hero and patches its
//! record into the raw state, so the raw state always matches the heroes and
//! the dirty flag is a plain comparison against the loaded content.

mod edit;
mod history;
mod sheet;
mod summary;

pub use edit::{EditRules, FieldPath, FieldValue, LEVEL_MAX, SKILLS_MAX};
pub use history::{Edit, History};
pub use sheet::{HeroSheet, SkillSheet};
pub use summary::HeroSummary;

use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backup::{self, BackupError};
use crate::codec::{CodecError, Container};
use crate::edition::Edition;
use crate::hero::{layout, ArmySlot, Hero, HeroState, ParseWarning};
use crate::mapconfig::{Bans, MapConfig};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No heroes found in savefile")]
    NoHeroes,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Field '{0}' is maintained by the game and cannot be edited")]
    FieldWriteRejected(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown {kind} '{name}' for edition {edition}")]
    UnknownName {
        kind: &'static str,
        name: String,
        edition: Edition,
    },

    #[error("{0} is banned on this map")]
    Banned(String),

    #[error("Cannot equip {artifact}: slots taken: {taken}")]
    SlotTaken { artifact: String, taken: String },

    #[error("Hero has no spellbook")]
    NoSpellbook,

    #[error("Hero index out of bounds: {0}")]
    HeroIndex(usize),

    #[error("No hero named '{0}'")]
    HeroNotFound(String),

    #[error("Slot index out of bounds: {index} (slots: {len})")]
    SlotIndex { index: usize, len: usize },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Backup(#[from] BackupError),
}

/// Result of serializing a savefile
#[derive(Debug, PartialEq, Eq)]
pub enum Serialized<'a> {
    /// Nothing changed; the content as loaded, without an encode pass
    Unchanged(&'a [u8]),
    /// Freshly encoded content
    Encoded(Vec<u8>),
}

impl Serialized<'_> {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Serialized::Unchanged(bytes) => bytes,
            Serialized::Encoded(bytes) => bytes,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Serialized::Unchanged(_))
    }
}

/// Whether to back up the target file before overwriting it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupPolicy {
    /// At most once per date, unless the file changed externally
    Daily,
    Skip,
}

/// What a save did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Backup created before writing
    pub backup: Option<PathBuf>,
    /// Whether the content was re-encoded
    pub encoded: bool,
}

/// Categories of one hero that differ from the loaded state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroChange {
    pub index: usize,
    pub name: String,
    pub categories: Vec<&'static str>,
}

/// A loaded savefile
#[derive(Debug, Clone)]
pub struct Savefile {
    /// Current raw game state, patched by edits
    raw: Vec<u8>,
    /// Raw game state as loaded or last saved
    raw0: Vec<u8>,
    /// File content as loaded or last saved
    disk: Vec<u8>,
    container: Container,
    edition: Edition,
    /// Sorted by name, case-insensitive
    heroes: Vec<Hero>,
    warnings: Vec<ParseWarning>,
    dirty: bool,
    last_backup: Option<NaiveDate>,
    map: MapConfig,
    bans: Bans,
}

/// Decode all heroes that an edition's rules find
fn decode(raw: &[u8], edition: Edition) -> (Vec<Hero>, Vec<ParseWarning>) {
    let mut heroes = Vec::new();
    let mut warnings = Vec::new();
    for (place, record) in edition.rules().find_records(raw).iter().enumerate() {
        let (hero, hero_warnings) = Hero::parse(record, place, raw);
        debug!(%edition, hero = %hero.name, offset = record.span.start, "Found hero record");
        heroes.push(hero);
        warnings.extend(hero_warnings);
    }
    heroes.sort_by_key(|hero| hero.name.to_lowercase());
    (heroes, warnings)
}

/// Pick the edition whose rules find the most heroes
///
/// Ties go to fewer warnings, then to the newer edition.
fn detect(
    raw: &[u8],
    forced: Option<Edition>,
) -> Result<(Edition, Vec<Hero>, Vec<ParseWarning>), ParseError> {
    let candidates = match forced {
        Some(edition) => vec![edition],
        None => Edition::ALL.to_vec(),
    };

    let mut best: Option<(Edition, Vec<Hero>, Vec<ParseWarning>)> = None;
    for edition in candidates {
        let (heroes, warnings) = decode(raw, edition);
        debug!(%edition, heroes = heroes.len(), warnings = warnings.len(), "Tried extraction rules");
        let better = match &best {
            None => true,
            Some((_, best_heroes, best_warnings)) => {
                heroes.len() > best_heroes.len()
                    || (heroes.len() == best_heroes.len() && warnings.len() <= best_warnings.len())
            }
        };
        if better {
            best = Some((edition, heroes, warnings));
        }
    }

    match best {
        Some((edition, heroes, warnings)) if !heroes.is_empty() => Ok((edition, heroes, warnings)),
        _ => Err(ParseError::NoHeroes),
    }
}

impl Savefile {
    /// Parse file content, detecting the container and the edition
    pub fn from_bytes(disk: Vec<u8>, edition: Option<Edition>) -> Result<Self, ParseError> {
        let container = Container::detect(&disk);
        let raw = container.unpack(&disk)?;
        let (edition, heroes, warnings) = detect(&raw, edition)?;

        info!(%edition, heroes = heroes.len(), warnings = warnings.len(), "Parsed savefile");
        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(Savefile {
            raw0: raw.clone(),
            raw,
            disk,
            container,
            edition,
            heroes,
            warnings,
            dirty: false,
            last_backup: None,
            map: MapConfig::default(),
            bans: Bans::default(),
        })
    }

    /// Load and parse a savefile
    pub fn load(path: &Path, edition: Option<Edition>) -> Result<Self, ParseError> {
        info!(path = %path.display(), "Loading savefile");
        Self::from_bytes(fs::read(path)?, edition)
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn hero(&self, index: usize) -> Result<&Hero, SaveError> {
        self.heroes.get(index).ok_or(SaveError::HeroIndex(index))
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Whether the raw state differs from the loaded content
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Date of the last backup made while saving this savefile
    pub fn last_backup(&self) -> Option<NaiveDate> {
        self.last_backup
    }

    pub fn map_config(&self) -> &MapConfig {
        &self.map
    }

    pub fn bans(&self) -> &Bans {
        &self.bans
    }

    fn rules(&self) -> EditRules<'_> {
        EditRules {
            edition: self.edition,
            bans: &self.bans,
        }
    }

    /// Index of a hero by name (case-insensitive) or by index number
    pub fn find_hero(&self, query: &str) -> Result<usize, SaveError> {
        let query = query.trim();
        if let Some(index) = self
            .heroes
            .iter()
            .position(|hero| hero.name.eq_ignore_ascii_case(query))
        {
            return Ok(index);
        }
        match query.parse::<usize>() {
            Ok(index) if index < self.heroes.len() => Ok(index),
            _ => Err(SaveError::HeroNotFound(query.to_string())),
        }
    }

    /// Summaries of all heroes
    pub fn index(&self) -> Vec<HeroSummary> {
        self.heroes
            .iter()
            .enumerate()
            .map(|(i, hero)| HeroSummary::from_hero(i, hero))
            .collect()
    }

    /// Read any hero field, including game-maintained ones
    pub fn get_field(&self, index: usize, path: &str) -> Result<FieldValue, SaveError> {
        let hero = self.hero(index)?;
        let path: FieldPath = path.parse()?;
        Ok(edit::read(&hero.state, &path, &hero.name, &hero.movement))
    }

    /// Validate and apply a single field edit
    ///
    /// On error the savefile is left unchanged.
    pub fn apply_edit(&mut self, index: usize, path: &str, value: &str) -> Result<Edit, SaveError> {
        let path: FieldPath = path.parse()?;
        let value = FieldValue::parse(&path, value)?;
        self.apply_value(index, &path, value)
    }

    /// Apply an already typed field value
    pub fn apply_value(
        &mut self,
        index: usize,
        path: &FieldPath,
        value: FieldValue,
    ) -> Result<Edit, SaveError> {
        let hero = self.hero(index)?;
        let label = format!("{}: {} = {}", hero.name, path, value);
        let before = hero.state.clone();
        let mut after = before.clone();
        edit::apply(&mut after, path, value, &self.rules())?;

        debug!(edit = %label, "Applied edit");
        self.set_state(index, after.clone());
        Ok(Edit {
            hero: index,
            label,
            before,
            after,
        })
    }

    /// Put back a hero state recorded in an edit
    pub fn restore_hero_state(&mut self, index: usize, state: HeroState) -> Result<(), SaveError> {
        self.hero(index)?;
        self.set_state(index, state);
        Ok(())
    }

    /// Castable spells are recomputed against the current bans
    fn set_state(&mut self, index: usize, mut state: HeroState) {
        state.refresh_available(&self.bans.spells);
        self.heroes[index].state = state;
        self.patch(index);
    }

    /// Write a hero's record into the raw state and refresh the dirty flag
    fn patch(&mut self, index: usize) {
        let hero = &self.heroes[index];
        let bytes = hero.serialize(self.edition);
        self.raw[hero.span.clone()].copy_from_slice(&bytes);
        self.dirty = self.raw != self.raw0;
    }

    /// Re-read a hero from the current raw state
    pub fn reparse_hero(&mut self, index: usize) -> Result<Vec<ParseWarning>, SaveError> {
        let hero = self.heroes.get_mut(index).ok_or(SaveError::HeroIndex(index))?;
        let warnings = hero.reparse(&self.raw);
        let place = hero.place;
        self.warnings.retain(|w| w.place != place);
        self.warnings.extend(warnings.iter().cloned());
        Ok(warnings)
    }

    /// Army slot contents, for pasting elsewhere
    pub fn copy_army_slot(&self, index: usize, slot: usize) -> Result<ArmySlot, SaveError> {
        let hero = self.hero(index)?;
        hero.state
            .army
            .get(slot)
            .copied()
            .ok_or(SaveError::SlotIndex {
                index: slot,
                len: layout::ARMY_SLOTS,
            })
    }

    /// Replace an army slot entirely
    pub fn paste_army_slot(
        &mut self,
        index: usize,
        slot: usize,
        troop: ArmySlot,
    ) -> Result<Edit, SaveError> {
        if slot >= layout::ARMY_SLOTS {
            return Err(SaveError::SlotIndex {
                index: slot,
                len: layout::ARMY_SLOTS,
            });
        }
        let value = troop.map_or(FieldValue::Empty, FieldValue::Troop);
        self.apply_value(index, &FieldPath::Army(slot), value)
    }

    /// Hero's editable state as a YAML sheet
    pub fn hero_yaml(&self, index: usize) -> Result<String, SaveError> {
        let hero = self.hero(index)?;
        HeroSheet::from_state(&hero.state, hero.movement).to_yaml(&hero.name)
    }

    /// Apply a YAML sheet to a hero
    ///
    /// Only the sections present are applied; movement is ignored.
    pub fn paste_hero_yaml(&mut self, index: usize, yaml: &str) -> Result<Edit, SaveError> {
        let hero = self.hero(index)?;
        let (source, sheet) = HeroSheet::from_yaml(yaml)?;
        let before = hero.state.clone();
        let after = sheet.apply(&before, &self.rules())?;
        let label = match source {
            Some(source) => format!("{}: paste from {}", hero.name, source),
            None => format!("{}: paste", hero.name),
        };

        debug!(edit = %label, "Pasted hero sheet");
        self.set_state(index, after.clone());
        Ok(Edit {
            hero: index,
            label,
            before,
            after,
        })
    }

    /// Heroes that differ from the loaded state, with the changed categories
    pub fn diff(&self) -> Vec<HeroChange> {
        self.heroes
            .iter()
            .enumerate()
            .filter(|(_, hero)| hero.is_modified())
            .map(|(index, hero)| HeroChange {
                index,
                name: hero.name.clone(),
                categories: hero.state.changed_categories(hero.original()),
            })
            .collect()
    }

    /// Install a map configuration and recompute castable spells
    ///
    /// Returns the indexes of heroes whose castable spells changed.
    pub fn resolve_banned_spells(&mut self, map: MapConfig) -> Vec<usize> {
        self.bans = map.bans();
        self.map = map;

        let mut changed = Vec::new();
        for index in 0..self.heroes.len() {
            if self.heroes[index].state.refresh_available(&self.bans.spells) {
                self.patch(index);
                changed.push(index);
            }
        }
        info!(heroes = changed.len(), "Resolved castable spells against map bans");
        changed
    }

    /// Encode the savefile for writing
    ///
    /// Without changes, returns the content as loaded without encoding.
    pub fn serialize(&self) -> Result<Serialized<'_>, CodecError> {
        if !self.dirty {
            return Ok(Serialized::Unchanged(&self.disk));
        }
        Ok(Serialized::Encoded(self.container.pack(&self.raw)?))
    }

    /// Write the savefile, backing up the target first per policy
    pub fn save(&mut self, path: &Path, policy: BackupPolicy) -> Result<SaveOutcome, SaveError> {
        self.save_on(path, policy, Local::now().date_naive())
    }

    /// Write the savefile with backups dated `today`
    pub fn save_on(
        &mut self,
        path: &Path,
        policy: BackupPolicy,
        today: NaiveDate,
    ) -> Result<SaveOutcome, SaveError> {
        let backup = match policy {
            BackupPolicy::Daily => backup::smart_backup_on(path, today)?,
            BackupPolicy::Skip => None,
        };
        if backup.is_some() {
            self.last_backup = Some(today);
        }

        let (data, encoded) = match self.serialize()? {
            Serialized::Unchanged(bytes) => (bytes.to_vec(), false),
            Serialized::Encoded(bytes) => (bytes, true),
        };
        fs::write(path, &data)?;
        if policy == BackupPolicy::Daily {
            backup::update_after_save(path)?;
        }
        info!(path = %path.display(), encoded, "Saved savefile");

        if encoded {
            self.raw0 = self.raw.clone();
            self.disk = data;
            for hero in &mut self.heroes {
                hero.rebase(&self.raw);
            }
            self.dirty = false;
        }
        Ok(SaveOutcome { backup, encoded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::testing::{padded_raw, RecordBuilder};
    use crate::hero::{Item, Troop, WornSlot};
    use crate::reference::SlotCategory;

    fn gelu() -> Vec<u8> {
        RecordBuilder::new("Gelu")
            .movement(1500, 1200)
            .primary([5, 4, 3, 2])
            .level(4)
            .troop(0, 92, 6)
            .worn(WornSlot::Spellbook, 0)
            .spell(53)
            .build()
    }

    fn crag() -> Vec<u8> {
        RecordBuilder::new("crag Hack").level(7).troop(2, 13, 2).build()
    }

    fn gzip(raw: &[u8]) -> Vec<u8> {
        Container::Gzip.pack(raw).unwrap()
    }

    fn load(records: &[&Vec<u8>]) -> Savefile {
        Savefile::from_bytes(gzip(&padded_raw(records)), None).unwrap()
    }

    #[test]
    fn test_no_heroes() {
        let raw = vec![0u8; 20_000];
        assert!(matches!(
            Savefile::from_bytes(gzip(&raw), None),
            Err(ParseError::NoHeroes)
        ));
        assert!(matches!(
            Savefile::from_bytes(vec![0x1F, 0x8B, 0x00], None),
            Err(ParseError::Codec(_))
        ));
    }

    #[test]
    fn test_heroes_sorted_case_insensitive() {
        let save = load(&[&gelu(), &crag()]);
        let names: Vec<&str> = save.heroes().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["crag Hack", "Gelu"]);
        assert_eq!(save.heroes()[0].place, 1);
        assert_eq!(save.find_hero("CRAG HACK").unwrap(), 0);
        assert_eq!(save.find_hero("1").unwrap(), 1);
        assert!(matches!(save.find_hero("Sandro"), Err(SaveError::HeroNotFound(_))));
    }

    #[test]
    fn test_edition_detection() {
        // Identical counts and warnings: the newest edition wins
        assert_eq!(load(&[&gelu()]).edition(), Edition::Hota);

        let disk = gzip(&padded_raw(&[&gelu()]));
        let forced = Savefile::from_bytes(disk, Some(Edition::Roe)).unwrap();
        assert_eq!(forced.edition(), Edition::Roe);

        // A worn combination artifact only matches editions that have them
        let alliance = RecordBuilder::new("Tarnum")
            .worn(WornSlot::Weapon, 129)
            .reserved(SlotCategory::Helm, 1)
            .build();
        let disk = gzip(&padded_raw(&[&alliance]));
        assert!(matches!(
            Savefile::from_bytes(disk.clone(), Some(Edition::Ab)),
            Err(ParseError::NoHeroes)
        ));
        let save = Savefile::from_bytes(disk, None).unwrap();
        assert!(save.edition().has_combinations());
    }

    #[test]
    fn test_unchanged_serialize_returns_loaded_content() {
        let disk = gzip(&padded_raw(&[&gelu(), &crag()]));
        let save = Savefile::from_bytes(disk.clone(), None).unwrap();
        let serialized = save.serialize().unwrap();
        assert!(serialized.is_unchanged());
        assert_eq!(serialized.bytes(), &disk[..]);
    }

    #[test]
    fn test_edit_marks_dirty_and_revert_clears() {
        let mut save = load(&[&gelu()]);
        let edit = save.apply_edit(0, "stats.attack", "50").unwrap();
        assert!(save.is_dirty());
        assert_eq!(edit.before.stats.attack, 5);

        let serialized = save.serialize().unwrap();
        let raw = Container::Gzip.unpack(serialized.bytes()).unwrap();
        let span = save.heroes()[0].span.clone();
        assert_eq!(raw[span.start + layout::ATTACK], 50);

        save.apply_edit(0, "stats.attack", "5").unwrap();
        assert!(!save.is_dirty());
        assert!(save.serialize().unwrap().is_unchanged());
    }

    #[test]
    fn test_movement_write_rejected() {
        let mut save = load(&[&gelu()]);
        let err = save.apply_edit(0, "movement.left", "9000").unwrap_err();
        assert!(matches!(err, SaveError::FieldWriteRejected(_)));
        assert!(!save.is_dirty());
        assert_eq!(
            save.get_field(0, "movement.left").unwrap(),
            FieldValue::Number(1200)
        );
    }

    #[test]
    fn test_save_backs_up_once_per_date() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("GAME.GM1");
        let disk = gzip(&padded_raw(&[&gelu(), &crag()]));
        fs::write(&path, &disk).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let mut save = Savefile::load(&path, None).unwrap();
        save.apply_edit(0, "stats.level", "20").unwrap();
        let outcome = save.save_on(&path, BackupPolicy::Daily, today).unwrap();
        assert!(outcome.encoded);
        assert_eq!(fs::read(outcome.backup.unwrap()).unwrap(), disk);
        assert!(!save.is_dirty());
        assert_eq!(save.last_backup(), Some(today));

        save.apply_edit(0, "stats.level", "21").unwrap();
        let outcome = save.save_on(&path, BackupPolicy::Daily, today).unwrap();
        assert!(outcome.backup.is_none());

        let outcome = save.save_on(&path, BackupPolicy::Daily, today).unwrap();
        assert!(!outcome.encoded);

        let reloaded = Savefile::load(&path, None).unwrap();
        let index = reloaded.find_hero("crag hack").unwrap();
        assert_eq!(reloaded.heroes()[index].state.stats.level, 21);
        assert_eq!(reloaded.raw(), save.raw());
    }

    #[test]
    fn test_reparse_keeps_patched_state() {
        let mut save = load(&[&gelu()]);
        save.apply_edit(0, "army[3]", "Pixie:9").unwrap();
        let warnings = save.reparse_hero(0).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(
            save.heroes()[0].state.army[3],
            Some(Troop { creature: 118, count: 9 })
        );
        assert!(matches!(save.reparse_hero(5), Err(SaveError::HeroIndex(5))));
    }

    #[test]
    fn test_resolve_banned_spells() {
        let blade = RecordBuilder::new("Gelu")
            .worn(WornSlot::Weapon, 128)
            .build();
        let mut save = load(&[&blade]);
        assert!(save.heroes()[0].state.available.is_empty());

        let banned = MapConfig::from_yaml("banned_spells: [Armageddon]").unwrap();
        assert!(save.resolve_banned_spells(banned).is_empty());
        assert!(!save.is_dirty());

        assert_eq!(save.resolve_banned_spells(MapConfig::default()), vec![0]);
        assert!(save.is_dirty());
        assert!(save.heroes()[0].state.available.contains(&26));
    }

    #[test]
    fn test_army_copy_paste() {
        let mut save = load(&[&gelu(), &crag()]);
        let gelu = save.find_hero("Gelu").unwrap();
        let crag = save.find_hero("crag hack").unwrap();

        let troop = save.copy_army_slot(gelu, 0).unwrap();
        save.paste_army_slot(crag, 6, troop).unwrap();
        assert_eq!(save.heroes()[crag].state.army[6], troop);

        save.paste_army_slot(crag, 2, None).unwrap();
        assert_eq!(save.heroes()[crag].state.army[2], None);
        assert!(save.paste_army_slot(crag, 7, None).is_err());
    }

    #[test]
    fn test_paste_into_blank_slot_with_stale_count() {
        let mut record = crag();
        layout::write_u32(&mut record, layout::ARMY_COUNTS + 4 * 4, 77);
        let mut save = load(&[&gelu(), &record]);
        let gelu = save.find_hero("Gelu").unwrap();
        let crag = save.find_hero("crag hack").unwrap();
        assert_eq!(save.heroes()[crag].state.army[4], None);

        let types = save.heroes()[crag].span.start + layout::ARMY_TYPES + 4 * 4;
        let counts = save.heroes()[crag].span.start + layout::ARMY_COUNTS + 4 * 4;

        let troop = save.copy_army_slot(gelu, 0).unwrap();
        save.paste_army_slot(crag, 4, troop).unwrap();
        assert_eq!(layout::read_u32(save.raw(), types), 92);
        assert_eq!(layout::read_u32(save.raw(), counts), 6);

        // Clearing again restores the bytes as loaded
        save.paste_army_slot(crag, 4, None).unwrap();
        assert_eq!(layout::read_u32(save.raw(), types), u32::MAX);
        assert_eq!(layout::read_u32(save.raw(), counts), 77);
        assert!(!save.is_dirty());
    }

    #[test]
    fn test_yaml_copy_paste_between_heroes() {
        let mut save = load(&[&gelu(), &crag()]);
        let gelu = save.find_hero("Gelu").unwrap();
        let crag = save.find_hero("crag hack").unwrap();

        let yaml = save.hero_yaml(gelu).unwrap();
        let edit = save.paste_hero_yaml(crag, &yaml).unwrap();
        assert!(edit.label.contains("paste from Gelu"));
        assert_eq!(save.heroes()[crag].state, save.heroes()[gelu].state);
        // Movement stays what the game wrote
        assert_eq!(save.heroes()[crag].movement.total, 0);

        let changes = save.diff();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].name, "crag Hack");
        assert!(changes[0].categories.contains(&"army"));
    }

    #[test]
    fn test_undo_redo() {
        let mut save = load(&[&gelu()]);
        let mut history = History::default();
        let original = save.heroes()[0].state.clone();

        history.record(save.apply_edit(0, "artifacts.weapon", "Centaur's Axe").unwrap());
        history.record(save.apply_edit(0, "inventory[0]", "Angel Wings").unwrap());
        let edited = save.heroes()[0].state.clone();
        assert_eq!(edited.stats.attack, 7);
        assert_eq!(edited.inventory[0], Some(Item::Artifact(72)));

        assert!(history.undo(&mut save).unwrap().is_some());
        assert!(history.undo(&mut save).unwrap().is_some());
        assert_eq!(save.heroes()[0].state, original);
        assert!(!save.is_dirty());
        assert!(history.undo(&mut save).unwrap().is_none());

        history.redo(&mut save).unwrap();
        history.redo(&mut save).unwrap();
        assert_eq!(save.heroes()[0].state, edited);
        assert!(save.is_dirty());
    }
}
