mod cli;
mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use config::Config;

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = || -> Result<commands::Options> {
        let config = Config::load()?;
        commands::Options::resolve(cli.edition, cli.map_config.as_deref(), &config)
    };

    match cli.command {
        Commands::Configure {
            show,
            backup,
            edition,
            map_config,
            reset,
        } => commands::configure::handle(show, backup, edition, map_config, reset)?,

        Commands::Info { file } => commands::save::info(&file, &options()?)?,

        Commands::Heroes { file, warnings } => {
            commands::save::heroes(&file, &options()?, warnings)?;
        }

        Commands::Hero { command } => match command {
            HeroCommand::Show { file, hero, yaml } => {
                commands::hero::show(&file, &options()?, &hero, yaml)?;
            }

            HeroCommand::Set {
                file,
                hero,
                path,
                value,
                no_backup,
            } => {
                commands::hero::set(&file, &options()?.with_backup(!no_backup), &hero, &path, &value)?;
            }

            HeroCommand::Paste {
                file,
                hero,
                yaml,
                no_backup,
            } => {
                commands::hero::paste(&file, &options()?.with_backup(!no_backup), &hero, &yaml)?;
            }

            HeroCommand::CopyArmy {
                file,
                hero,
                from,
                to_hero,
                to,
                no_backup,
            } => {
                commands::hero::copy_army(
                    &file,
                    &options()?.with_backup(!no_backup),
                    (&hero, from),
                    (&to_hero, to),
                )?;
            }
        },

        Commands::Export {
            file,
            format,
            output,
        } => commands::export::handle(&file, &options()?, format, output.as_deref())?,
    }

    Ok(())
}
