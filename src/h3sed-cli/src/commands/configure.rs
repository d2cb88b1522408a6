//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up h3sed CLI defaults.

use crate::config::Config;
use anyhow::Result;
use h3sed::{Edition, MapConfig};
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `show` - If true, show current configuration
/// * `backup` - Back up savefiles before overwriting them
/// * `edition` - Edition to parse as by default
/// * `map_config` - Map configuration applied by default
/// * `reset` - Clear the default edition and map configuration
pub fn handle(
    show: bool,
    backup: Option<bool>,
    edition: Option<Edition>,
    map_config: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        print!("{}", describe(&config));
        return Ok(());
    }

    if !update(&mut config, backup, edition, map_config, reset)? {
        show_usage();
        return Ok(());
    }

    config.save()?;
    print!("{}", describe(&config));
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply settings to the configuration; returns whether anything was given
fn update(
    config: &mut Config,
    backup: Option<bool>,
    edition: Option<Edition>,
    map_config: Option<PathBuf>,
    reset: bool,
) -> Result<bool> {
    let mut given = false;

    if reset {
        config.edition = None;
        config.map_config = None;
        given = true;
    }
    if let Some(backup) = backup {
        config.backup = backup;
        given = true;
    }
    if let Some(edition) = edition {
        config.edition = Some(edition);
        given = true;
    }
    if let Some(path) = map_config {
        // Must parse before it is stored
        MapConfig::load(&path)?;
        config.map_config = Some(path);
        given = true;
    }

    Ok(given)
}

/// Display current configuration
fn describe(config: &Config) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Backup: {}\n",
        if config.backup { "daily" } else { "off" }
    ));
    match config.edition {
        Some(edition) => out.push_str(&format!("Edition: {} ({})\n", edition, edition.title())),
        None => out.push_str("Edition: detect\n"),
    }
    match &config.map_config {
        Some(path) => out.push_str(&format!("Map config: {}\n", path.display())),
        None => out.push_str("No map config\n"),
    }
    if !config.recent_files.is_empty() {
        out.push_str("Recent files:\n");
        for file in &config.recent_files {
            out.push_str(&format!("  {}\n", file.display()));
        }
    }
    if let Ok(path) = Config::config_path() {
        out.push_str(&format!("Config file: {}\n", path.display()));
    }
    out
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: h3sed configure --show");
    println!("   or: h3sed configure [--backup true|false] [--edition roe|ab|sod|hota]");
    println!("                       [--map-config FILE] [--reset]");
    println!();
    println!("Note: the edition is detected from each savefile unless configured.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_update_nothing_given() {
        let mut config = Config::default();
        assert!(!update(&mut config, None, None, None, false).unwrap());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_update_and_reset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let map = temp_dir.path().join("map.yaml");
        fs::write(&map, "banned_artifacts: [Spellbinder's Hat]\n").unwrap();

        let mut config = Config::default();
        assert!(update(&mut config, Some(false), Some(Edition::Ab), Some(map.clone()), false)
            .unwrap());
        assert!(!config.backup);
        assert_eq!(config.edition, Some(Edition::Ab));
        assert_eq!(config.map_config, Some(map));
        assert!(describe(&config).contains("Edition: ab (Armageddon's Blade)"));

        assert!(update(&mut config, None, None, None, true).unwrap());
        assert_eq!(config.edition, None);
        assert_eq!(config.map_config, None);
        assert!(!config.backup);
        assert!(describe(&config).contains("Edition: detect"));
    }

    #[test]
    fn test_update_rejects_bad_map_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let map = temp_dir.path().join("map.yaml");
        fs::write(&map, "banned_spells: {{{").unwrap();

        let mut config = Config::default();
        assert!(update(&mut config, None, None, Some(map), false).is_err());
        assert_eq!(config.map_config, None);
    }
}
