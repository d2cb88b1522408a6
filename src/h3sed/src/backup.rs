//! Dated backup management with hash tracking.
//!
//! A savefile is copied to `<file>.<YYYY-MM-DD>.bak` before it is first
//! overwritten on a given date. Metadata in `<file>.bak.json` remembers the
//! date of the last backup and the hash of the file as last written, so a
//! second save on the same date does not back up again unless the file was
//! changed by someone else (the game) in between. Such further same-day
//! backups are numbered `<file>.<YYYY-MM-DD>-<n>.bak`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata tracking backups of one savefile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Date of the most recent backup
    pub last_backup: NaiveDate,

    /// Path of the most recent backup
    pub backup_path: PathBuf,

    /// Hash of the save file when the backup was created
    pub original_hash: String,

    /// Hash of the save file after the last save
    pub last_save_hash: String,
}

impl BackupMetadata {
    pub fn new(date: NaiveDate, backup_path: PathBuf, hash: String) -> Self {
        BackupMetadata {
            last_backup: date,
            backup_path,
            original_hash: hash.clone(),
            last_save_hash: hash,
        }
    }
}

/// SHA-256 of a byte buffer, hex encoded
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a file, hex encoded
pub fn hash_file(path: &Path) -> Result<String, BackupError> {
    Ok(hash_bytes(&fs::read(path)?))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Metadata file path for a savefile
pub fn metadata_path(save_path: &Path) -> PathBuf {
    with_suffix(save_path, ".bak.json")
}

/// Backup path for a date; `n` above 1 numbers further same-day backups
pub fn backup_path(save_path: &Path, date: NaiveDate, n: usize) -> PathBuf {
    let date = date.format("%Y-%m-%d");
    if n <= 1 {
        with_suffix(save_path, &format!(".{}.bak", date))
    } else {
        with_suffix(save_path, &format!(".{}-{}.bak", date, n))
    }
}

/// First backup path for the date that does not exist yet
fn next_backup_path(save_path: &Path, date: NaiveDate) -> PathBuf {
    (1..)
        .map(|n| backup_path(save_path, date, n))
        .find(|path| !path.exists())
        .unwrap_or_else(|| backup_path(save_path, date, 1))
}

/// Read backup metadata if it exists
pub fn read_metadata(metadata_path: &Path) -> Result<Option<BackupMetadata>, BackupError> {
    if !metadata_path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(metadata_path)?;
    let metadata: BackupMetadata = serde_json::from_str(&data)?;
    Ok(Some(metadata))
}

/// Write backup metadata
pub fn write_metadata(metadata_path: &Path, metadata: &BackupMetadata) -> Result<(), BackupError> {
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(metadata_path, json)?;
    Ok(())
}

/// Determine if the file should be backed up on `today`
///
/// Returns true if:
/// - No backup was made yet
/// - The last backup was made on an earlier date
/// - The file no longer matches what was last saved or backed up (changed
///   externally since)
pub fn should_create_backup(save_path: &Path, today: NaiveDate) -> Result<bool, BackupError> {
    let Some(metadata) = read_metadata(&metadata_path(save_path))? else {
        return Ok(true);
    };
    if metadata.last_backup != today {
        return Ok(true);
    }

    let current_hash = hash_file(save_path)?;
    Ok(current_hash != metadata.original_hash && current_hash != metadata.last_save_hash)
}

/// Copy the savefile to a new dated backup and reset metadata
pub fn create_backup(save_path: &Path, today: NaiveDate) -> Result<PathBuf, BackupError> {
    let backup = next_backup_path(save_path, today);
    fs::copy(save_path, &backup)?;

    let hash = hash_file(save_path)?;
    let metadata = BackupMetadata::new(today, backup.clone(), hash);
    write_metadata(&metadata_path(save_path), &metadata)?;
    info!(backup = %backup.display(), "Created backup");
    Ok(backup)
}

/// Record the hash of the file as just written
pub fn update_after_save(save_path: &Path) -> Result<(), BackupError> {
    let path = metadata_path(save_path);
    let Some(mut metadata) = read_metadata(&path)? else {
        return Ok(());
    };
    metadata.last_save_hash = hash_file(save_path)?;
    write_metadata(&path, &metadata)
}

/// Back up the savefile if needed, returning the new backup's path
///
/// A file that does not exist yet has nothing to back up.
pub fn smart_backup_on(save_path: &Path, today: NaiveDate) -> Result<Option<PathBuf>, BackupError> {
    if !save_path.exists() {
        return Ok(None);
    }
    if !should_create_backup(save_path, today)? {
        debug!(path = %save_path.display(), "Backup already made today");
        return Ok(None);
    }
    create_backup(save_path, today).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_file(path: &Path, content: &[u8]) -> Result<(), BackupError> {
        let mut file = fs::File::create(path)?;
        file.write_all(content)?;
        Ok(())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_hash_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("test.GM1");

        create_test_file(&file_path, b"test content").unwrap();
        let hash = hash_file(&file_path).unwrap();

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_bytes(b"test content"));
    }

    #[test]
    fn test_backup_paths() {
        let save_path = Path::new("/tmp/GAME.GM1");

        assert_eq!(
            backup_path(save_path, date(5), 1),
            PathBuf::from("/tmp/GAME.GM1.2024-03-05.bak")
        );
        assert_eq!(
            backup_path(save_path, date(5), 2),
            PathBuf::from("/tmp/GAME.GM1.2024-03-05-2.bak")
        );
        assert_eq!(metadata_path(save_path), PathBuf::from("/tmp/GAME.GM1.bak.json"));
    }

    #[test]
    fn test_metadata_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("test.json");

        let original = BackupMetadata::new(date(1), PathBuf::from("a.bak"), "hash123".to_string());
        write_metadata(&path, &original).unwrap();

        let loaded = read_metadata(&path).unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_not_backed_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let save_path = temp_dir.path().join("new.GM1");
        assert_eq!(smart_backup_on(&save_path, date(1)).unwrap(), None);
    }

    #[test]
    fn test_once_per_date() {
        let temp_dir = tempfile::tempdir().unwrap();
        let save_path = temp_dir.path().join("test.GM1");
        create_test_file(&save_path, b"original").unwrap();

        let backup = smart_backup_on(&save_path, date(1)).unwrap().unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"original");

        // Our own save later the same day
        create_test_file(&save_path, b"edited").unwrap();
        update_after_save(&save_path).unwrap();
        assert_eq!(smart_backup_on(&save_path, date(1)).unwrap(), None);

        // Next day backs up again
        let next = smart_backup_on(&save_path, date(2)).unwrap().unwrap();
        assert_eq!(next, backup_path(&save_path, date(2), 1));
        assert_eq!(fs::read(&next).unwrap(), b"edited");
    }

    #[test]
    fn test_external_change_same_day() {
        let temp_dir = tempfile::tempdir().unwrap();
        let save_path = temp_dir.path().join("test.GM1");
        create_test_file(&save_path, b"original").unwrap();
        smart_backup_on(&save_path, date(1)).unwrap();

        // The game overwrote the file
        create_test_file(&save_path, b"replayed").unwrap();
        let second = smart_backup_on(&save_path, date(1)).unwrap().unwrap();
        assert_eq!(second, backup_path(&save_path, date(1), 2));
        assert_eq!(fs::read(&second).unwrap(), b"replayed");
        assert_eq!(
            fs::read(backup_path(&save_path, date(1), 1)).unwrap(),
            b"original"
        );
    }
}
