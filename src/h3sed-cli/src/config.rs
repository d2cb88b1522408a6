//! Configuration management for h3sed CLI

use anyhow::{Context, Result};
use h3sed::{Edition, RecentFiles};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_backup() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Back up savefiles before the first overwrite of the day
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Edition to parse as, instead of detecting it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<Edition>,

    /// Map configuration with banned spells and artifacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_config: Option<PathBuf>,

    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backup: true,
            edition: None,
            map_config: None,
            recent_files: Vec::new(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("h3sed");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    pub fn recent(&self) -> RecentFiles {
        RecentFiles::new(self.recent_files.clone())
    }

    pub fn set_recent(&mut self, recent: &RecentFiles) {
        self.recent_files = recent.files().to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.backup);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("h3sed").join("config.toml");

        let mut config = Config::default();
        config.backup = false;
        config.edition = Some(Edition::Sod);
        config.recent_files = vec!["GAME.GM1".into()];
        config.save_to(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("edition = \"sod\""));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "edition = \"hota\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.backup);
        assert_eq!(config.edition, Some(Edition::Hota));
        assert!(config.recent_files.is_empty());
    }

    #[test]
    fn test_recent_round_trip() {
        let mut config = Config::default();
        let mut recent = config.recent();
        recent.add(Path::new("a.GM1"));
        recent.add(Path::new("b.GM1"));
        config.set_recent(&recent);
        assert_eq!(config.recent_files, [PathBuf::from("b.GM1"), PathBuf::from("a.GM1")]);
    }
}
