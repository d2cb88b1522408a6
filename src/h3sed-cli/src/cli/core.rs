//! Core CLI definitions

use clap::{Parser, Subcommand};
use h3sed::{Edition, ExportFormat};
use std::path::PathBuf;

use super::hero::HeroCommand;

#[derive(Parser)]
#[command(name = "h3sed")]
#[command(about = "Heroes of Might and Magic III Savefile Editor", long_about = None)]
pub struct Cli {
    /// Game edition to parse as, instead of detecting it (roe, ab, sod, hota)
    #[arg(long, env = "H3SED_EDITION")]
    pub edition: Option<Edition>,

    /// Map configuration with banned spells and artifacts (YAML or JSON)
    #[arg(long)]
    pub map_config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show savefile information (container, edition, hero count)
    #[command(visible_alias = "i")]
    Info {
        /// Path to savefile
        file: PathBuf,
    },

    /// List heroes in a savefile
    #[command(visible_alias = "ls")]
    Heroes {
        /// Path to savefile
        file: PathBuf,

        /// Also list parse warnings
        #[arg(short, long)]
        warnings: bool,
    },

    /// Hero operations (show, set, paste, copy-army)
    #[command(visible_alias = "h")]
    Hero {
        #[command(subcommand)]
        command: HeroCommand,
    },

    /// Export the hero index as CSV or HTML
    #[command(visible_alias = "e")]
    Export {
        /// Path to savefile
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file (uses stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Back up savefiles before overwriting them
        #[arg(long)]
        backup: Option<bool>,

        /// Default game edition instead of detecting it
        #[arg(long)]
        edition: Option<Edition>,

        /// Default map configuration file
        #[arg(long)]
        map_config: Option<PathBuf>,

        /// Reset edition and map configuration to none
        #[arg(long, conflicts_with_all = ["edition", "map_config"])]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "h3sed", "--edition", "sod", "export", "GAME.GM1", "-f", "html",
        ])
        .unwrap();
        assert_eq!(cli.edition, Some(Edition::Sod));
        assert!(matches!(
            cli.command,
            Commands::Export {
                format: ExportFormat::Html,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_edition_rejected() {
        assert!(Cli::try_parse_from(["h3sed", "--edition", "woe", "info", "x"]).is_err());
    }
}
