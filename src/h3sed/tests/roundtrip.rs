//! Load, edit, save and reload a gzip savefile on disk

use std::fs;

use h3sed::codec::Container;
use h3sed::hero::layout;
use h3sed::{BackupPolicy, Edition, FieldValue, Item, SaveError, Savefile, Session, WornSlot};

fn record(name: &str, creature: u32, count: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; layout::RECORD_LEN];
    bytes[layout::ARMY_TYPES..layout::ARMY_TYPES + layout::ARMY_SLOTS * 4].fill(layout::BLANK);
    layout::write_u32(&mut bytes, layout::ARMY_TYPES, creature);
    layout::write_u32(&mut bytes, layout::ARMY_COUNTS, count);
    layout::write_u32(&mut bytes, layout::MOVEMENT_TOTAL, 1500);
    layout::write_u32(&mut bytes, layout::MOVEMENT_LEFT, 300);
    bytes[layout::LEVEL] = 5;
    bytes[layout::NAME..layout::NAME + name.len()].copy_from_slice(name.as_bytes());
    bytes[layout::EQUIPMENT..layout::RESERVED - 1].fill(layout::BLANK);
    bytes
}

fn game_state() -> Vec<u8> {
    let mut raw: Vec<u8> = (0..12_000u32).map(|i| (i % 7) as u8).collect();
    for hero in [record("Sandro", 58, 30), record("Gelu", 92, 6)] {
        raw.extend_from_slice(&hero);
        raw.extend_from_slice(&[0x2A; 40]);
    }
    raw
}

#[test]
fn test_load_edit_save_reload() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("GAME.GM1");
    let original = Container::Gzip.pack(&game_state())?;
    fs::write(&path, &original)?;

    let mut save = Savefile::load(&path, None)?;
    assert_eq!(save.container(), Container::Gzip);
    assert_eq!(save.edition(), Edition::Hota);
    assert_eq!(save.heroes().len(), 2);
    assert_eq!(save.heroes()[0].name, "Gelu");

    // Unedited: nothing is encoded and the bytes on disk stay as they were
    let outcome = save.save(&path, BackupPolicy::Skip)?;
    assert!(!outcome.encoded);
    assert_eq!(fs::read(&path)?, original);

    let gelu = save.find_hero("gelu")?;
    save.apply_edit(gelu, "stats.defense", "33")?;
    save.apply_edit(gelu, "artifacts.spellbook", "Spellbook")?;
    save.apply_edit(gelu, "spells.Slow", "yes")?;
    save.apply_edit(gelu, "inventory[10]", "Spell Scroll: Town Portal")?;
    let err = save.apply_edit(gelu, "movement.total", "5000").unwrap_err();
    assert!(matches!(err, SaveError::FieldWriteRejected(_)));
    assert!(save.is_dirty());

    let outcome = save.save(&path, BackupPolicy::Daily)?;
    assert!(outcome.encoded);
    let backup = outcome.backup.expect("first save of the day backs up");
    assert_eq!(fs::read(backup)?, original);

    let reloaded = Savefile::load(&path, None)?;
    let hero = &reloaded.heroes()[reloaded.find_hero("Gelu")?];
    assert_eq!(hero.state.stats.defense, 33);
    assert!(hero.state.artifacts.has_spellbook());
    assert_eq!(hero.state.artifacts.get(WornSlot::Spellbook), Some(Item::Artifact(0)));
    assert_eq!(
        reloaded.get_field(reloaded.find_hero("Gelu")?, "inventory[10]")?.to_string(),
        "Spell Scroll: Town Portal"
    );
    assert_eq!(hero.movement.total, 1500);
    assert_eq!(
        reloaded.get_field(reloaded.find_hero("Gelu")?, "spells.Slow")?,
        FieldValue::Bool(true)
    );

    // Only the edited hero's record changed
    let before = game_state();
    let after = reloaded.raw();
    assert_eq!(before.len(), after.len());
    let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
    let span = hero.span.clone();
    assert!(changed.iter().all(|i| span.contains(i)));

    Ok(())
}

#[test]
fn test_session_round_trip_with_undo() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("GAME.GM1");
    fs::write(&path, Container::Gzip.pack(&game_state())?)?;

    let mut session = Session::default().with_backup(BackupPolicy::Skip);
    session.open(&path)?;
    session.edit("Sandro", "stats.knowledge", "25")?;
    session.copy_army(("Gelu", 0), ("Sandro", 3))?;
    session.undo()?;
    session.save()?;

    let reloaded = Savefile::load(&path, None)?;
    let sandro = &reloaded.heroes()[reloaded.find_hero("Sandro")?];
    assert_eq!(sandro.state.stats.knowledge, 25);
    assert_eq!(sandro.state.army[3], None);
    Ok(())
}
