//! Game editions and their hero extraction rules
//!
//! The savefile format is not documented, so hero records are located by
//! matching byte patterns over the decompressed game state. Each edition
//! carries its own declarative rule set; the parser looks the rules up by
//! edition instead of branching on edition inside the matching code.

use once_cell::sync::Lazy;
use regex::bytes::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::hero::layout;

/// Game edition variant, ordered from oldest to newest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// The Restoration of Erathia
    Roe,
    /// Armageddon's Blade
    Ab,
    /// The Shadow of Death
    Sod,
    /// Horn of the Abyss
    Hota,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown edition '{0}' (expected one of: roe, ab, sod, hota)")]
pub struct UnknownEdition(pub String);

impl Edition {
    /// All editions, oldest first
    pub const ALL: [Edition; 4] = [Edition::Roe, Edition::Ab, Edition::Sod, Edition::Hota];

    /// Short code used in configuration and on the command line
    pub fn code(self) -> &'static str {
        match self {
            Edition::Roe => "roe",
            Edition::Ab => "ab",
            Edition::Sod => "sod",
            Edition::Hota => "hota",
        }
    }

    /// Full edition title
    pub fn title(self) -> &'static str {
        match self {
            Edition::Roe => "The Restoration of Erathia",
            Edition::Ab => "Armageddon's Blade",
            Edition::Sod => "The Shadow of Death",
            Edition::Hota => "Horn of the Abyss",
        }
    }

    /// Whether combination artifacts exist in this edition
    pub fn has_combinations(self) -> bool {
        self >= Edition::Sod
    }

    /// Extraction rules for this edition
    pub fn rules(self) -> &'static ExtractionRules {
        &RULES[self as usize]
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Edition {
    type Err = UnknownEdition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edition::ALL
            .into_iter()
            .find(|e| e.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEdition(s.to_string()))
    }
}

// Hero record pattern. Offsets are relative to the total movement field.
// There are more bytes in front of it, but those can include the hero
// biography, making their length indeterminate.
const HERO_PATTERN: &str = r"
    .{4}                     # movement points in total            000-003
    .{4}                     # movement points remaining           004-007
    .{4}                     # experience                          008-011
    [\x00-\x1C]\x00{3}       # skill slots used                    012-015
    .{2}                     # spell points remaining              016-017
    .                        # hero level                          018

    .{63}                    # unknown                             019-081

    .{28}                    # 7 creature type ids                 082-109
    .{28}                    # 7 creature counts                   110-137

    (?P<name>[^\x00-\x20,\xF0-\xFF].{11}\x00)   # name, NUL-padded 138-150
    [\x00-\x03]{28}          # skill levels                        151-178
    [\x00-\x1C]{28}          # skill slots                         179-206
    .{4}                     # primary attributes                  207-210

    [\x00-\x01]{70}          # spells in book                      211-280
    [\x00-\x01]{70}          # spells available                    281-350

                             # 19 worn artifact cells              351-502
                             #   blank:        FF FF FF FF XY XY XY XY
                             #   artifact:     XY 00 00 00 FF FF FF FF
                             #   scroll:       XY 00 00 00 XY 00 00 00
                             #   war machine:  XY 00 00 00 XY XY 00 00
    (?P<artifacts>(
        (\xFF{4}.{4}) | (.\x00{3}(\x00{4}|\xFF{4})) | (.\x00{3}.{2}\x00{2})
    ){19})

                             # 64 backpack cells, scrolls included 503-1014
    ( ((.\x00{3})|\xFF{4}) (.\x00{3}|\xFF{4}) ){64}
";

// Counters of slots taken by combination artifacts                 1015-1024
const RESERVED_COMBINATIONS: &str = r".[\x00-\x01]{6}[\x00-\x02][\x00-\x01][\x00-\x05]";

// Editions without combination artifacts never reserve slots
const RESERVED_NONE: &str = r".\x00{9}";

/// Offset before which hero records are not searched for
const SEARCH_FROM: usize = 10_000;

static RULES: Lazy<[ExtractionRules; 4]> = Lazy::new(|| Edition::ALL.map(ExtractionRules::new));

/// A hero record located in the raw game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMatch {
    pub name: String,
    pub span: Range<usize>,
}

/// Declarative hero extraction rules for one edition
#[derive(Debug)]
pub struct ExtractionRules {
    pub edition: Edition,
    pub search_from: usize,
    pattern: Regex,
}

impl ExtractionRules {
    fn new(edition: Edition) -> Self {
        let reserved = if edition.has_combinations() {
            RESERVED_COMBINATIONS
        } else {
            RESERVED_NONE
        };
        let source = format!("{HERO_PATTERN}\n{reserved}");
        let pattern = RegexBuilder::new(&source)
            .unicode(false)
            .dot_matches_new_line(true)
            .ignore_whitespace(true)
            .size_limit(1 << 24)
            .build()
            .expect("hero record pattern is valid");
        ExtractionRules {
            edition,
            search_from: SEARCH_FROM,
            pattern,
        }
    }

    /// Locate all hero records in raw game state
    ///
    /// Candidates whose name field is not a clean NUL-padded name, or whose
    /// worn artifact block is a filler pattern, are skipped one byte at a
    /// time so that an overlapping real record is still found.
    pub fn find_records(&self, raw: &[u8]) -> Vec<RecordMatch> {
        let mut records = Vec::new();
        let mut pos = self.search_from;

        while pos < raw.len() {
            let Some(caps) = self.pattern.captures_at(raw, pos) else {
                break;
            };
            let (Some(whole), Some(name), Some(artifacts)) =
                (caps.get(0), caps.name("name"), caps.name("artifacts"))
            else {
                break;
            };

            match strip_name(name.as_bytes()) {
                Some(name) if !is_filler_artifacts(artifacts.as_bytes()) => {
                    debug_assert_eq!(whole.len(), layout::RECORD_LEN);
                    records.push(RecordMatch {
                        name,
                        span: whole.range(),
                    });
                    pos = whole.end();
                }
                _ => pos = whole.start() + 1,
            }
        }

        records
    }
}

/// Decode a NUL-padded name field, rejecting fields with garbage after the name
pub(crate) fn strip_name(field: &[u8]) -> Option<String> {
    let end = field.iter().position(|&b| b == 0)?;
    if end == 0 || field[end..].iter().any(|&b| b != 0) {
        return None;
    }
    let text = &field[..end];
    if text.iter().any(|&b| b < 0x20 || b == b',' || b >= 0xF0) {
        return None;
    }
    // Names are stored in a single-byte Windows codepage
    Some(text.iter().map(|&b| b as char).collect())
}

/// Whether a worn-artifact block is a filler pattern rather than real data
fn is_filler_artifacts(block: &[u8]) -> bool {
    const FILLER: [u8; 8] = [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
    block.first() == Some(&0) || block.chunks(8).all(|cell| cell == FILLER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::testing::{padded_raw, RecordBuilder};

    #[test]
    fn test_edition_parse_and_display() {
        assert_eq!("hota".parse::<Edition>().unwrap(), Edition::Hota);
        assert_eq!(" SoD ".parse::<Edition>().unwrap(), Edition::Sod);
        assert!("wog".parse::<Edition>().is_err());
        assert_eq!(Edition::Ab.to_string(), "ab");
    }

    #[test]
    fn test_edition_ordering() {
        assert!(Edition::Roe < Edition::Hota);
        assert!(!Edition::Ab.has_combinations());
        assert!(Edition::Sod.has_combinations());
    }

    #[test]
    fn test_rules_lookup() {
        for edition in Edition::ALL {
            assert_eq!(edition.rules().edition, edition);
        }
    }

    #[test]
    fn test_strip_name() {
        assert_eq!(strip_name(b"Gelu\0\0\0\0\0\0\0\0\0"), Some("Gelu".into()));
        assert_eq!(strip_name(b"Sir Mullich\0\0"), Some("Sir Mullich".into()));
        assert_eq!(strip_name(b"Gelu\0x\0\0\0\0\0\0\0"), None);
        assert_eq!(strip_name(b"\0\0\0\0\0\0\0\0\0\0\0\0\0"), None);
        assert_eq!(strip_name(b"Ge,lu\0\0\0\0\0\0\0\0"), None);
    }

    #[test]
    fn test_find_records() {
        let gelu = RecordBuilder::new("Gelu").build();
        let crag = RecordBuilder::new("Crag Hack").build();
        let raw = padded_raw(&[&gelu, &crag]);

        let records = Edition::Sod.rules().find_records(&raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Gelu");
        assert_eq!(records[1].name, "Crag Hack");
        assert_eq!(records[0].span.len(), layout::RECORD_LEN);
        assert_eq!(&raw[records[1].span.clone()], &crag[..]);
    }

    #[test]
    fn test_records_before_search_offset_ignored() {
        let gelu = RecordBuilder::new("Gelu").build();
        let mut raw = gelu.clone();
        raw.resize(SEARCH_FROM + 100, 0);
        assert!(Edition::Sod.rules().find_records(&raw).is_empty());
    }

    #[test]
    fn test_classic_rules_reject_reserved_slots() {
        let record = RecordBuilder::new("Gelu")
            .worn(crate::hero::WornSlot::Weapon, 129)
            .reserved(crate::reference::SlotCategory::Helm, 1)
            .build();
        let raw = padded_raw(&[&record]);

        assert_eq!(Edition::Sod.rules().find_records(&raw).len(), 1);
        assert!(Edition::Ab.rules().find_records(&raw).is_empty());
    }

    #[test]
    fn test_filler_artifacts_rejected() {
        let mut record = RecordBuilder::new("Gelu").build();
        for cell in record[layout::EQUIPMENT..layout::INVENTORY].chunks_mut(8) {
            cell.copy_from_slice(&[0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
        }
        let raw = padded_raw(&[&record]);
        assert!(Edition::Hota.rules().find_records(&raw).is_empty());
    }
}
