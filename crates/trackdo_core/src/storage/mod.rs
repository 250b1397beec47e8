//! Durable key-value slots for serialized snapshots.
//!
//! # Responsibility
//! - Define the storage contract the task repository writes through.
//! - Provide SQLite, file and in-memory slot backends.
//!
//! # Invariants
//! - `write_slot` replaces a slot atomically: readers observe either the
//!   previous payload or the new one, never a partial write.
//! - A failed write leaves the previous payload intact.
//! - Reading a slot that was never written returns `Ok(None)`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod file_slots;
pub mod memory_slots;
pub mod sqlite_slots;

pub use file_slots::FileSlotStorage;
pub use memory_slots::MemorySlotStorage;
pub use sqlite_slots::SqliteSlotStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level failure of a slot backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Io(std::io::Error),
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid slot key: `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Named-slot storage with atomic whole-value replacement.
pub trait SnapshotStorage {
    fn read_slot(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    fn write_slot(&self, key: &str, payload: &[u8]) -> StorageResult<()>;
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for &S {
    fn read_slot(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, payload: &[u8]) -> StorageResult<()> {
        (**self).write_slot(key, payload)
    }
}

/// Rejects keys that cannot be used as a slot name on every backend.
///
/// Keys are limited to ASCII alphanumerics plus `_`, `-` and `.`, and must
/// not start with `.`, so a key can never escape a slot directory.
pub(crate) fn validate_slot_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
