//! Hero command handlers

use anyhow::{Context, Result};
use h3sed::hero::Hero;
use h3sed::reference;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::{open_session, with_session, Options};

/// Print a hero as text or as a YAML sheet
pub fn show(file: &Path, options: &Options, hero: &str, yaml: bool) -> Result<()> {
    let session = open_session(file, options)?;
    let save = session.savefile().context("No savefile open")?;
    let index = save.find_hero(hero)?;

    if yaml {
        print!("{}", save.hero_yaml(index)?);
    } else {
        print!("{}", describe(save.hero(index)?));
    }
    Ok(())
}

/// Set one field on a hero
pub fn set(file: &Path, options: &Options, hero: &str, path: &str, value: &str) -> Result<()> {
    let mut session = open_session(file, options)?;
    with_session(&mut session, |s| {
        let label = s.edit(hero, path, value)?;
        println!("{}", label);
        Ok(())
    })?;
    Ok(())
}

/// Apply a YAML hero sheet read from a file
pub fn paste(file: &Path, options: &Options, hero: &str, yaml: &Path) -> Result<()> {
    let text = fs::read_to_string(yaml)
        .with_context(|| format!("Failed to read {}", yaml.display()))?;
    let mut session = open_session(file, options)?;
    with_session(&mut session, |s| {
        let label = s.paste_hero(hero, &text)?;
        println!("{}", label);
        Ok(())
    })?;
    Ok(())
}

/// Copy an army slot between heroes
pub fn copy_army(
    file: &Path,
    options: &Options,
    from: (&str, usize),
    to: (&str, usize),
) -> Result<()> {
    let mut session = open_session(file, options)?;
    with_session(&mut session, |s| {
        let label = s.copy_army(from, to)?;
        println!("{}", label);
        Ok(())
    })?;
    Ok(())
}

fn list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "{}: none", title);
    } else {
        let _ = writeln!(out, "{}:", title);
        for item in items {
            let _ = writeln!(out, "  {}", item);
        }
    }
}

fn describe(hero: &Hero) -> String {
    let state = &hero.state;
    let stats = &state.stats;
    let mut out = String::new();

    let _ = writeln!(out, "{} (level {})", hero.name, stats.level);
    let _ = writeln!(
        out,
        "Attack {}  Defense {}  Power {}  Knowledge {}",
        stats.attack, stats.defense, stats.power, stats.knowledge
    );
    let _ = writeln!(
        out,
        "Experience {}  Mana {}  Movement {}/{}",
        stats.experience, stats.mana, hero.movement.left, hero.movement.total
    );

    let skills: Vec<String> = state
        .skills
        .iter()
        .map(|s| format!("{} {}", s.level, s.name()))
        .collect();
    list(&mut out, "Skills", &skills);

    let army: Vec<String> = state
        .army
        .iter()
        .enumerate()
        .filter_map(|(slot, troop)| troop.as_ref().map(|t| format!("[{}] {}", slot, t)))
        .collect();
    list(&mut out, "Army", &army);

    let mut artifacts: Vec<String> = state
        .artifacts
        .iter()
        .map(|(slot, item)| format!("{}: {}", slot, item))
        .collect();
    artifacts.extend(
        state
            .artifacts
            .taken_slots()
            .into_iter()
            .map(|(slot, owner)| format!("{}: (taken by {})", slot, owner)),
    );
    list(&mut out, "Artifacts", &artifacts);

    let inventory: Vec<String> = state
        .inventory
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.map(|item| format!("[{}] {}", i, item)))
        .collect();
    list(&mut out, "Inventory", &inventory);

    let spells: Vec<String> = state
        .available
        .iter()
        .map(|&id| reference::spell_label(id))
        .collect();
    list(&mut out, "Spells", &spells);

    if hero.is_modified() {
        let _ = writeln!(out, "(modified)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{open_with, testing::write_save};
    use h3sed::{RecentFiles, Savefile};

    #[test]
    fn test_describe() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_save(temp_dir.path());
        let save = Savefile::load(&path, None).unwrap();
        let gelu = save.hero(save.find_hero("Gelu").unwrap()).unwrap();

        let text = describe(gelu);
        assert!(text.starts_with("Gelu (level 5)\n"));
        assert!(text.contains("Movement 0/1500"));
        assert!(text.contains("Skills: none"));
        assert!(text.contains("Army:\n  [0] "));
        assert!(!text.contains("(modified)"));
    }

    #[test]
    fn test_set_and_copy_army_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_save(temp_dir.path());
        let options = Options::default();

        let mut session = open_with(&path, &options, RecentFiles::default()).unwrap();
        with_session(&mut session, |s| {
            s.edit("Sandro", "stats.power", "12")?;
            s.copy_army(("Gelu", 0), ("Sandro", 2))?;
            Ok(())
        })
        .unwrap();

        let save = Savefile::load(&path, None).unwrap();
        let sandro = save.hero(save.find_hero("Sandro").unwrap()).unwrap();
        assert_eq!(sandro.state.stats.power, 12);
        assert_eq!(sandro.state.army[2], save.hero(0).unwrap().state.army[0]);
    }

    #[test]
    fn test_rejected_edit_leaves_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_save(temp_dir.path());
        let before = fs::read(&path).unwrap();

        let mut session = open_with(&path, &Options::default(), RecentFiles::default()).unwrap();
        let result = with_session(&mut session, |s| {
            s.edit("Gelu", "movement.left", "100")?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
