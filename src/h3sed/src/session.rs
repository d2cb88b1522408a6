//! Editing session: the open savefile and everything around it

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::edition::Edition;
use crate::hero::ArmySlot;
use crate::mapconfig::MapConfig;
use crate::save::{BackupPolicy, History, ParseError, SaveError, SaveOutcome, Savefile};

/// Most recently opened files kept
pub const RECENT_FILES_MAX: usize = 20;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No savefile open")]
    NoFile,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Recently opened files, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentFiles(Vec<PathBuf>);

impl RecentFiles {
    pub fn new(files: Vec<PathBuf>) -> Self {
        let mut recent = RecentFiles(Vec::new());
        for file in files.into_iter().rev() {
            recent.add(&file);
        }
        recent
    }

    /// Move a file to the front, dropping the oldest beyond the limit
    pub fn add(&mut self, path: &Path) {
        self.0.retain(|p| p != path);
        self.0.insert(0, path.to_path_buf());
        self.0.truncate(RECENT_FILES_MAX);
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.0
    }
}

struct OpenFile {
    path: PathBuf,
    savefile: Savefile,
    history: History,
}

/// Explicit editing context
///
/// Holds at most one open savefile with its path and undo history, the
/// recent files list, the active map configuration and save preferences.
pub struct Session {
    open: Option<OpenFile>,
    recent: RecentFiles,
    map: MapConfig,
    edition: Option<Edition>,
    backup: BackupPolicy,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(RecentFiles::default())
    }
}

impl Session {
    pub fn new(recent: RecentFiles) -> Self {
        Session {
            open: None,
            recent,
            map: MapConfig::default(),
            edition: None,
            backup: BackupPolicy::Daily,
        }
    }

    /// Force an edition for files opened from now on
    pub fn with_edition(mut self, edition: Option<Edition>) -> Self {
        self.edition = edition;
        self
    }

    pub fn with_backup(mut self, policy: BackupPolicy) -> Self {
        self.backup = policy;
        self
    }

    /// Open a savefile, replacing the current one
    ///
    /// On failure nothing stays open, so no stale heroes remain visible.
    /// A non-empty map configuration is applied to the opened file.
    pub fn open(&mut self, path: &Path) -> Result<&mut Savefile, SessionError> {
        if self.is_dirty() {
            warn!("Discarding unsaved changes");
        }
        self.open = None;

        let mut savefile = Savefile::load(path, self.edition)?;
        if !self.map.is_empty() {
            savefile.resolve_banned_spells(self.map.clone());
        }
        self.recent.add(path);
        let open = self.open.insert(OpenFile {
            path: path.to_path_buf(),
            savefile,
            history: History::default(),
        });
        Ok(&mut open.savefile)
    }

    /// Discard the open savefile without saving
    pub fn close(&mut self) {
        if let Some(open) = self.open.take() {
            info!(path = %open.path.display(), "Closed savefile");
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.open.as_ref().map(|o| o.path.as_path())
    }

    pub fn savefile(&self) -> Option<&Savefile> {
        self.open.as_ref().map(|o| &o.savefile)
    }

    pub fn is_dirty(&self) -> bool {
        self.savefile().map_or(false, Savefile::is_dirty)
    }

    pub fn recent_files(&self) -> &RecentFiles {
        &self.recent
    }

    pub fn map_config(&self) -> &MapConfig {
        &self.map
    }

    fn current(&mut self) -> Result<&mut OpenFile, SessionError> {
        self.open.as_mut().ok_or(SessionError::NoFile)
    }

    /// Install a map configuration; returns how many heroes changed
    pub fn set_map_config(&mut self, map: MapConfig) -> usize {
        self.map = map.clone();
        self.open
            .as_mut()
            .map_or(0, |o| o.savefile.resolve_banned_spells(map).len())
    }

    /// Apply a field edit to a hero and record it for undo
    pub fn edit(&mut self, hero: &str, path: &str, value: &str) -> Result<String, SessionError> {
        let open = self.current()?;
        let index = open.savefile.find_hero(hero)?;
        let edit = open.savefile.apply_edit(index, path, value)?;
        let label = edit.label.clone();
        open.history.record(edit);
        Ok(label)
    }

    /// Paste a YAML hero sheet onto a hero and record it for undo
    pub fn paste_hero(&mut self, hero: &str, yaml: &str) -> Result<String, SessionError> {
        let open = self.current()?;
        let index = open.savefile.find_hero(hero)?;
        let edit = open.savefile.paste_hero_yaml(index, yaml)?;
        let label = edit.label.clone();
        open.history.record(edit);
        Ok(label)
    }

    /// Copy an army slot from one hero to another
    pub fn copy_army(
        &mut self,
        from: (&str, usize),
        to: (&str, usize),
    ) -> Result<String, SessionError> {
        let open = self.current()?;
        let source = open.savefile.find_hero(from.0)?;
        let target = open.savefile.find_hero(to.0)?;
        let troop: ArmySlot = open.savefile.copy_army_slot(source, from.1)?;
        let edit = open.savefile.paste_army_slot(target, to.1, troop)?;
        let label = edit.label.clone();
        open.history.record(edit);
        Ok(label)
    }

    pub fn undo(&mut self) -> Result<Option<String>, SessionError> {
        let open = self.current()?;
        Ok(open.history.undo(&mut open.savefile)?)
    }

    pub fn redo(&mut self) -> Result<Option<String>, SessionError> {
        let open = self.current()?;
        Ok(open.history.redo(&mut open.savefile)?)
    }

    /// Save to the path the file was opened from
    pub fn save(&mut self) -> Result<SaveOutcome, SessionError> {
        let policy = self.backup;
        let open = self.current()?;
        Ok(open.savefile.save(&open.path, policy)?)
    }

    /// Save to another path, which becomes the session's path
    pub fn save_as(&mut self, path: &Path) -> Result<SaveOutcome, SessionError> {
        let policy = self.backup;
        let open = self.current()?;
        let outcome = open.savefile.save(path, policy)?;
        open.path = path.to_path_buf();
        self.recent.add(path);
        Ok(outcome)
    }
}
