//! Spellbook and castable spells

use std::collections::BTreeSet;

use super::layout::{SPELLS_AVAILABLE, SPELLS_BOOK, SPELL_COUNT};

pub(super) fn parse_book(bytes: &[u8]) -> BTreeSet<u8> {
    parse_flags(bytes, SPELLS_BOOK)
}

pub(super) fn parse_available(bytes: &[u8]) -> BTreeSet<u8> {
    parse_flags(bytes, SPELLS_AVAILABLE)
}

fn parse_flags(bytes: &[u8], start: usize) -> BTreeSet<u8> {
    bytes[start..start + SPELL_COUNT]
        .iter()
        .enumerate()
        .filter(|(_, &flag)| flag != 0)
        .map(|(id, _)| id as u8)
        .collect()
}

pub(super) fn write_book(book: &BTreeSet<u8>, bytes: &mut [u8]) {
    write_flags(book, SPELLS_BOOK, bytes);
}

pub(super) fn write_available(available: &BTreeSet<u8>, bytes: &mut [u8]) {
    write_flags(available, SPELLS_AVAILABLE, bytes);
}

fn write_flags(spells: &BTreeSet<u8>, start: usize, bytes: &mut [u8]) {
    for id in 0..SPELL_COUNT {
        bytes[start + id] = u8::from(spells.contains(&(id as u8)));
    }
}

/// Spells castable by a hero
///
/// Spellbook spells are always castable; artifact-granted spells only when
/// the map does not ban them.
pub fn resolve_available(
    book: &BTreeSet<u8>,
    granted: &BTreeSet<u8>,
    banned: &BTreeSet<u8>,
) -> BTreeSet<u8> {
    let mut available = book.clone();
    available.extend(granted.difference(banned));
    available
}
