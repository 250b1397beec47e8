//! Directory-backed snapshot slots.
//!
//! Each slot is one `<key>.json` file. Writes go to a temp file in the same
//! directory which is then renamed over the target, so an interrupted write
//! leaves the previous file untouched.

use super::{validate_slot_key, SnapshotStorage, StorageResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const SLOT_FILE_EXTENSION: &str = "json";

/// Slot storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Creates storage rooted at `dir`, creating the directory when missing.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing `key`.
    pub fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_slot_key(key)?;
        Ok(self.dir.join(format!("{key}.{SLOT_FILE_EXTENSION}")))
    }
}

impl SnapshotStorage for FileSlotStorage {
    fn read_slot(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.slot_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, key: &str, payload: &[u8]) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| err.error)?;
        Ok(())
    }
}
