//! Savefile overview command handlers

use anyhow::{Context, Result};
use h3sed::Savefile;
use std::fmt::Write as _;
use std::path::Path;

use super::{open_session, Options};

/// Print container, edition and hero count
pub fn info(file: &Path, options: &Options) -> Result<()> {
    let session = open_session(file, options)?;
    let save = session.savefile().context("No savefile open")?;
    print!("{}", describe(file, save));
    Ok(())
}

/// Print one line per hero, optionally followed by parse warnings
pub fn heroes(file: &Path, options: &Options, warnings: bool) -> Result<()> {
    let session = open_session(file, options)?;
    let save = session.savefile().context("No savefile open")?;
    print!("{}", list_heroes(save, warnings));
    Ok(())
}

fn describe(file: &Path, save: &Savefile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", file.display());
    let _ = writeln!(out, "Container: {:?}", save.container());
    let _ = writeln!(out, "Edition: {} ({})", save.edition().title(), save.edition());
    let _ = writeln!(out, "Game state: {} bytes", save.raw().len());
    let _ = writeln!(out, "Heroes: {}", save.heroes().len());
    if !save.warnings().is_empty() {
        let _ = writeln!(out, "Warnings: {}", save.warnings().len());
    }
    if let Some(date) = save.last_backup() {
        let _ = writeln!(out, "Last backup: {}", date);
    }
    out
}

fn list_heroes(save: &Savefile, warnings: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<16} {:>3}  {:>15}  Army",
        "#", "Name", "Lvl", "Att/Def/Pow/Kno"
    );
    for hero in save.index() {
        let _ = writeln!(
            out,
            "{:>3}  {:<16} {:>3}  {:>15}  {}",
            hero.index,
            hero.name,
            hero.level,
            format!("{}/{}/{}/{}", hero.attack, hero.defense, hero.power, hero.knowledge),
            hero.army.join(", ")
        );
    }

    if warnings {
        let _ = writeln!(out);
        if save.warnings().is_empty() {
            let _ = writeln!(out, "No warnings");
        }
        for warning in save.warnings() {
            let _ = writeln!(out, "warning: {}", warning);
        }
    }
    out
}
