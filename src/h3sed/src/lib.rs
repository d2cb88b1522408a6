//! # h3sed
//!
//! Heroes of Might and Magic III savefile editor library - parsing, editing,
//! and writing back savefiles.
//!
//! This library provides functionality to:
//! - Unpack gzip savefiles and locate hero records for each game edition
//! - Decode heroes: attributes, skills, army, artifacts, backpack and spells
//! - Apply validated edits that respect game-maintained fields, map bans and
//!   combination artifact slots
//! - Write back only what changed, with dated backups
//! - Copy and paste heroes as YAML, and export the hero index
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use h3sed::{BackupPolicy, Savefile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("GAME.GM1");
//! let mut save = Savefile::load(path, None)?;
//! println!("Edition: {}", save.edition());
//!
//! let gelu = save.find_hero("Gelu")?;
//! save.apply_edit(gelu, "stats.attack", "20")?;
//! save.apply_edit(gelu, "army[0]", "Archangel:10")?;
//!
//! save.save(path, BackupPolicy::Daily)?;
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod codec;
pub mod edition;
pub mod export;
pub mod hero;
pub mod mapconfig;
pub mod reference;
pub mod save;
pub mod session;

// Re-export commonly used items
#[doc(inline)]
pub use backup::{smart_backup_on, BackupError};
#[doc(inline)]
pub use codec::{CodecError, Container};
#[doc(inline)]
pub use edition::{Edition, ExtractionRules, UnknownEdition};
#[doc(inline)]
pub use export::{ExportError, ExportFormat};
#[doc(inline)]
pub use hero::{Hero, HeroState, Item, ParseWarning, Troop, WornSlot};
#[doc(inline)]
pub use mapconfig::{Bans, MapConfig, MapConfigError};
#[doc(inline)]
pub use save::{
    BackupPolicy, Edit, FieldPath, FieldValue, HeroChange, HeroSheet, HeroSummary, History,
    ParseError, SaveError, SaveOutcome, Savefile, Serialized,
};
#[doc(inline)]
pub use session::{RecentFiles, Session, SessionError};
