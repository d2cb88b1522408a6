//! Per-map restrictions
//!
//! Scenarios can ban spells and artifacts. A map configuration lists the
//! banned names and is read from YAML (JSON is accepted as well):
//!
//! ```yaml
//! banned_spells: [Armageddon, Dimension Door]
//! banned_artifacts: [Angel Wings]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::reference;

#[derive(Error, Debug)]
pub enum MapConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse map configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Banned spell and artifact names for a map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub banned_spells: BTreeSet<String>,
    #[serde(default)]
    pub banned_artifacts: BTreeSet<String>,
}

/// Banned catalog ids resolved from a map configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bans {
    pub spells: BTreeSet<u8>,
    pub artifacts: BTreeSet<u32>,
}

impl MapConfig {
    pub fn from_yaml(text: &str) -> Result<Self, MapConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, MapConfigError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn is_empty(&self) -> bool {
        self.banned_spells.is_empty() && self.banned_artifacts.is_empty()
    }

    /// Resolve names to catalog ids; unknown names are logged and skipped
    pub fn bans(&self) -> Bans {
        let mut bans = Bans::default();
        for name in &self.banned_spells {
            match reference::spell_by_name(name) {
                Some(spell) => {
                    bans.spells.insert(spell.id);
                }
                None => warn!(spell = %name, "Unknown spell in map configuration"),
            }
        }
        for name in &self.banned_artifacts {
            match reference::artifact_by_name(name) {
                Some(artifact) => {
                    bans.artifacts.insert(artifact.id);
                }
                None => warn!(artifact = %name, "Unknown artifact in map configuration"),
            }
        }
        bans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_and_json() {
        let yaml = MapConfig::from_yaml("banned_spells: [Armageddon, haste]\n").unwrap();
        assert!(yaml.banned_artifacts.is_empty());

        let json = MapConfig::from_yaml(r#"{"banned_spells": ["Armageddon", "haste"]}"#).unwrap();
        assert_eq!(yaml, json);
        assert_eq!(json.bans().spells, BTreeSet::from([26, 53]));
    }

    #[test]
    fn test_unknown_names_skipped() {
        let config = MapConfig::from_yaml(
            "banned_spells: [Fireball, Summon Pizza]\nbanned_artifacts: [Angel Wings, Magic Lamp]\n",
        )
        .unwrap();
        let bans = config.bans();
        assert_eq!(bans.spells.len(), 1);
        assert_eq!(bans.artifacts, BTreeSet::from([72]));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("map.yaml");
        fs::write(&path, "banned_artifacts: [Angel Wings]\n").unwrap();
        let config = MapConfig::load(&path).unwrap();
        assert!(!config.is_empty());
        assert!(MapConfig::load(&temp_dir.path().join("missing.yaml")).is_err());
    }
}
