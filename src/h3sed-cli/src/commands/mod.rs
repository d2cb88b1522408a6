//! Command handlers for h3sed CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod export;
pub mod hero;
pub mod save;

use anyhow::{Context, Result};
use h3sed::{BackupPolicy, Edition, MapConfig, RecentFiles, SaveOutcome, Session};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;

/// Settings shared by the commands that open a savefile
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub edition: Option<Edition>,
    pub map: MapConfig,
    pub backup: bool,
}

impl Options {
    /// Merge command-line options over the stored configuration
    pub fn resolve(
        edition: Option<Edition>,
        map_config: Option<&Path>,
        config: &Config,
    ) -> Result<Self> {
        let map = match map_config.or(config.map_config.as_deref()) {
            Some(path) => MapConfig::load(path)
                .with_context(|| format!("Failed to load map config {}", path.display()))?,
            None => MapConfig::default(),
        };

        Ok(Options {
            edition: edition.or(config.edition),
            map,
            backup: config.backup,
        })
    }

    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.backup &= enabled;
        self
    }

    fn backup_policy(&self) -> BackupPolicy {
        if self.backup {
            BackupPolicy::Daily
        } else {
            BackupPolicy::Skip
        }
    }
}

/// Open a savefile in a fresh session
pub fn open_with(file: &Path, options: &Options, recent: RecentFiles) -> Result<Session> {
    let mut session = Session::new(recent)
        .with_edition(options.edition)
        .with_backup(options.backup_policy());
    session.set_map_config(options.map.clone());
    session
        .open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    Ok(session)
}

/// Open a savefile and remember it in the recent files list
pub fn open_session(file: &Path, options: &Options) -> Result<Session> {
    let mut config = Config::load()?;
    let session = open_with(file, options, config.recent())?;

    config.set_recent(session.recent_files());
    if let Err(e) = config.save() {
        warn!("Could not update recent files: {:#}", e);
    }
    Ok(session)
}

/// Apply a modification to the open savefile and save if anything changed
pub fn with_session<F>(session: &mut Session, modify: F) -> Result<Option<SaveOutcome>>
where
    F: FnOnce(&mut Session) -> Result<()>,
{
    modify(session)?;

    if !session.is_dirty() {
        println!("No changes");
        return Ok(None);
    }

    let outcome = session.save().context("Failed to save")?;
    if let Some(backup) = &outcome.backup {
        println!("Backup created: {}", backup.display());
    }
    if let Some(path) = session.path() {
        println!("Saved {}", path.display());
    }
    debug!(encoded = outcome.encoded, "Save finished");
    Ok(Some(outcome))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Builds minimal savefiles on disk for handler tests

    use h3sed::codec::Container;
    use h3sed::hero::layout;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn record(name: &str, creature: u32, count: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; layout::RECORD_LEN];
        bytes[layout::ARMY_TYPES..layout::ARMY_TYPES + layout::ARMY_SLOTS * 4]
            .fill(layout::BLANK);
        layout::write_u32(&mut bytes, layout::ARMY_TYPES, creature);
        layout::write_u32(&mut bytes, layout::ARMY_COUNTS, count);
        layout::write_u32(&mut bytes, layout::MOVEMENT_TOTAL, 1500);
        bytes[layout::LEVEL] = 5;
        bytes[layout::NAME..layout::NAME + name.len()].copy_from_slice(name.as_bytes());
        bytes[layout::EQUIPMENT..layout::RESERVED - 1].fill(layout::BLANK);
        bytes
    }

    /// Gzip savefile holding Sandro and Gelu
    pub fn write_save(dir: &Path) -> PathBuf {
        let mut raw: Vec<u8> = (0..12_000u32).map(|i| (i % 7) as u8).collect();
        for hero in [record("Sandro", 58, 30), record("Gelu", 92, 6)] {
            raw.extend_from_slice(&hero);
            raw.extend_from_slice(&[0x2A; 40]);
        }
        let path = dir.join("GAME.GM1");
        fs::write(&path, Container::Gzip.pack(&raw).unwrap()).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_prefers_command_line() {
        let mut config = Config::default();
        config.edition = Some(Edition::Roe);
        config.backup = false;

        let options = Options::resolve(Some(Edition::Sod), None, &config).unwrap();
        assert_eq!(options.edition, Some(Edition::Sod));
        assert!(!options.backup);

        let options = Options::resolve(None, None, &config).unwrap();
        assert_eq!(options.edition, Some(Edition::Roe));
        assert!(options.map.is_empty());
    }

    #[test]
    fn test_resolve_map_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("map.yaml");
        fs::write(&path, "banned_spells: [Fly, Dimension Door]\n").unwrap();

        let options = Options::resolve(None, Some(&path), &Config::default()).unwrap();
        assert_eq!(options.map.banned_spells.len(), 2);

        let missing = temp_dir.path().join("missing.yaml");
        assert!(Options::resolve(None, Some(&missing), &Config::default()).is_err());
    }

    #[test]
    fn test_with_backup_only_disables() {
        let options = Options {
            backup: false,
            ..Options::default()
        };
        assert!(!options.with_backup(true).backup);
    }

    #[test]
    fn test_with_session_saves_only_changes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = testing::write_save(temp_dir.path());
        let options = Options::default();
        let mut session = open_with(&path, &options, RecentFiles::default()).unwrap();

        let outcome = with_session(&mut session, |_| Ok(())).unwrap();
        assert!(outcome.is_none());

        let outcome = with_session(&mut session, |s| {
            s.edit("Gelu", "stats.attack", "9")?;
            Ok(())
        })
        .unwrap()
        .unwrap();
        assert!(outcome.encoded);
        assert!(outcome.backup.is_none());
    }
}
