//! Export command handler

use anyhow::{Context, Result};
use h3sed::{export, ExportFormat, Savefile};
use std::fs;
use std::path::Path;

use super::{open_session, Options};

/// Export the hero index to a file or stdout
pub fn handle(
    file: &Path,
    options: &Options,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let session = open_session(file, options)?;
    let save = session.savefile().context("No savefile open")?;
    let text = render(file, save, format)?;

    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Exported {} heroes to {}",
                save.heroes().len(),
                path.display()
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn render(file: &Path, save: &Savefile, format: ExportFormat) -> Result<String> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = format!("Heroes of Might and Magic III: {} ({})", name, save.edition().title());
    export::export(format, &title, &save.index()).context("Export failed")
}
