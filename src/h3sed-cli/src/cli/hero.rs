//! Hero command CLI definitions

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum HeroCommand {
    /// Show a hero
    Show {
        /// Path to savefile
        file: PathBuf,

        /// Hero name or index
        hero: String,

        /// Output as a YAML sheet, for pasting onto a hero
        #[arg(long)]
        yaml: bool,
    },

    /// Set a hero field and save
    Set {
        /// Path to savefile
        file: PathBuf,

        /// Hero name or index
        hero: String,

        /// Field path (e.g. "stats.attack", "army[0]", "artifacts.weapon",
        /// "skills.Wisdom", "spells.Haste", "inventory[3]")
        path: String,

        /// New value; empty clears a slot
        value: String,

        /// Do not back up the savefile before writing
        #[arg(long)]
        no_backup: bool,
    },

    /// Apply a YAML hero sheet to a hero and save
    Paste {
        /// Path to savefile
        file: PathBuf,

        /// Hero name or index
        hero: String,

        /// YAML sheet as written by `hero show --yaml`
        yaml: PathBuf,

        /// Do not back up the savefile before writing
        #[arg(long)]
        no_backup: bool,
    },

    /// Copy an army slot from one hero to another and save
    CopyArmy {
        /// Path to savefile
        file: PathBuf,

        /// Source hero name or index
        hero: String,

        /// Source army slot (0-6)
        from: usize,

        /// Target hero name or index
        to_hero: String,

        /// Target army slot (0-6)
        to: usize,

        /// Do not back up the savefile before writing
        #[arg(long)]
        no_backup: bool,
    },
}
