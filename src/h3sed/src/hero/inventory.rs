//! Artifact cells and the backpack

use std::fmt;

use super::layout::{self, BLANK, CELL, INVENTORY, INVENTORY_SLOTS};
use super::ParseWarning;
use crate::reference::{self, SPELL_SCROLL};

/// Contents of an artifact cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Artifact(u32),
    /// Spell scroll carrying one spell
    Scroll(u8),
}

impl Item {
    pub fn artifact_id(self) -> u32 {
        match self {
            Item::Artifact(id) => id,
            Item::Scroll(_) => SPELL_SCROLL,
        }
    }

    /// Artifact catalog entry, if the id is known
    pub fn artifact(self) -> Option<&'static reference::Artifact> {
        reference::artifact_by_id(self.artifact_id())
    }

    /// Parse a display label back into an item
    ///
    /// Scrolls are written as `Spell Scroll: <spell>`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if let Some((head, spell)) = label.split_once(':') {
            if head.trim().eq_ignore_ascii_case("Spell Scroll") {
                return reference::spell_by_name(spell).map(|s| Item::Scroll(s.id));
            }
        }
        match reference::artifact_by_name(label)? {
            a if a.id == SPELL_SCROLL => None,
            a => Some(Item::Artifact(a.id)),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Item::Artifact(id) => f.write_str(&reference::artifact_label(id)),
            Item::Scroll(spell) => write!(f, "Spell Scroll: {}", reference::spell_label(spell)),
        }
    }
}

/// Decode one artifact cell
///
/// A scroll whose spell word does not fit a spell id is an error carrying
/// that word.
pub(crate) fn read_cell(bytes: &[u8], pos: usize) -> Result<Option<Item>, u32> {
    if bytes[pos..pos + 4].iter().all(|&b| b == BLANK) {
        return Ok(None);
    }
    let id = layout::read_u32(bytes, pos);
    if id == SPELL_SCROLL {
        let spell = layout::read_u32(bytes, pos + 4);
        return u8::try_from(spell).map(|s| Some(Item::Scroll(s))).map_err(|_| spell);
    }
    Ok(Some(Item::Artifact(id)))
}

/// Encode one artifact cell
pub(crate) fn write_cell(bytes: &mut [u8], pos: usize, item: Option<Item>) {
    match item {
        None => bytes[pos..pos + CELL].fill(BLANK),
        Some(Item::Artifact(id)) => {
            layout::write_u32(bytes, pos, id);
            bytes[pos + 4..pos + CELL].fill(BLANK);
        }
        Some(Item::Scroll(spell)) => {
            layout::write_u32(bytes, pos, SPELL_SCROLL);
            layout::write_u32(bytes, pos + 4, u32::from(spell));
        }
    }
}

/// Decode a hero's artifact cell, warning about ids missing from the catalog
///
/// A scroll with an out-of-range spell word reads as blank; its bytes stay
/// as they are unless the cell is edited.
pub(crate) fn read_checked(
    bytes: &[u8],
    pos: usize,
    field: &str,
    warnings: &mut Vec<ParseWarning>,
) -> Option<Item> {
    let item = match read_cell(bytes, pos) {
        Ok(item) => item?,
        Err(spell) => {
            warnings.push(ParseWarning::new(field, format!("scroll spell id {} out of range", spell)));
            return None;
        }
    };
    match item {
        Item::Artifact(id) if reference::artifact_by_id(id).is_none() => {
            warnings.push(ParseWarning::new(field, format!("unknown artifact id {}", id)));
        }
        Item::Scroll(spell) if reference::spell_by_id(spell).is_none() => {
            warnings.push(ParseWarning::new(field, format!("unknown scroll spell id {}", spell)));
        }
        _ => {}
    }
    Some(item)
}

pub(super) fn parse(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> Vec<Option<Item>> {
    (0..INVENTORY_SLOTS)
        .map(|i| {
            // Zero-filled cells decode as the spellbook, which never sits in the backpack
            read_checked(bytes, INVENTORY + i * CELL, &format!("inventory[{}]", i), warnings)
                .filter(|item| item.artifact().map_or(true, |a| a.fits_inventory()))
        })
        .collect()
}

/// Rewrite changed backpack cells; cells blank before and after keep their bytes
pub(super) fn write(state: &[Option<Item>], state0: &[Option<Item>], bytes: &mut [u8]) {
    for (i, (item, item0)) in state.iter().zip(state0).enumerate() {
        if item != item0 {
            write_cell(bytes, INVENTORY + i * CELL, *item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_codec() {
        let mut bytes = vec![0u8; 16];
        write_cell(&mut bytes, 0, Some(Item::Artifact(7)));
        assert_eq!(bytes[..8], [7, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(read_cell(&bytes, 0), Ok(Some(Item::Artifact(7))));

        write_cell(&mut bytes, 8, Some(Item::Scroll(53)));
        assert_eq!(bytes[8..], [1, 0, 0, 0, 53, 0, 0, 0]);
        assert_eq!(read_cell(&bytes, 8), Ok(Some(Item::Scroll(53))));

        write_cell(&mut bytes, 0, None);
        assert_eq!(read_cell(&bytes, 0), Ok(None));
    }

    #[test]
    fn test_blank_with_trailing_data() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 3, 4, 0, 0];
        assert_eq!(read_cell(&bytes, 0), Ok(None));
    }

    #[test]
    fn test_item_labels() {
        assert_eq!(Item::Scroll(53).to_string(), "Spell Scroll: Haste");
        assert_eq!(Item::from_label("spell scroll: haste"), Some(Item::Scroll(53)));
        assert_eq!(Item::from_label("Skull Helmet"), Some(Item::Artifact(20)));
        assert_eq!(Item::from_label("Spell Scroll"), None);
        assert_eq!(Item::from_label("Nothing"), None);
    }

    #[test]
    fn test_parse_treats_zero_fill_as_blank() {
        let mut bytes = vec![0u8; layout::RECORD_LEN];
        write_cell(&mut bytes, INVENTORY + CELL, Some(Item::Scroll(15)));
        let mut warnings = Vec::new();
        let items = parse(&bytes, &mut warnings);
        assert_eq!(items[0], None);
        assert_eq!(items[1], Some(Item::Scroll(15)));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_wide_scroll_spell_word() {
        let mut bytes = vec![0u8; layout::RECORD_LEN];
        let pos = INVENTORY + 3 * CELL;
        layout::write_u32(&mut bytes, pos, SPELL_SCROLL);
        layout::write_u32(&mut bytes, pos + 4, 309);
        assert_eq!(read_cell(&bytes, pos), Err(309));

        let mut warnings = Vec::new();
        let items = parse(&bytes, &mut warnings);
        assert_eq!(items[3], None);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "inventory[3]");
        assert!(warnings[0].message.contains("309"));

        // Left alone unless the cell is edited
        let before = bytes.clone();
        write(&items, &items, &mut bytes);
        assert_eq!(bytes, before);
    }

    #[test]
    fn test_write_only_changed() {
        let mut bytes = vec![0u8; layout::RECORD_LEN];
        let state0 = vec![None; INVENTORY_SLOTS];
        let mut state = state0.clone();
        state[2] = Some(Item::Artifact(46));
        write(&state, &state0, &mut bytes);

        // Slot 0 stays zero-filled rather than being rewritten as blank
        assert!(bytes[INVENTORY..INVENTORY + CELL].iter().all(|&b| b == 0));
        assert_eq!(read_cell(&bytes, INVENTORY + 2 * CELL), Ok(Some(Item::Artifact(46))));
    }
}
