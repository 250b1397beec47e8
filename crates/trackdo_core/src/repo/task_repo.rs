//! Task snapshot repository.
//!
//! # Responsibility
//! - Serialize the full task sequence into one storage slot.
//! - Restore the sequence wholesale at session start.
//!
//! # Invariants
//! - Encoding happens before any storage call, so an encode failure never
//!   touches the stored snapshot.
//! - Missing or malformed snapshots load as an empty sequence; storage read
//!   failures are surfaced so an unread snapshot is never overwritten.

use crate::model::task::Task;
use crate::storage::{SnapshotStorage, StorageError};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used by the mobile app for the task snapshot.
pub const DEFAULT_TASKS_SLOT: &str = "savedTrackYourDos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Snapshot codec and storage failures.
#[derive(Debug)]
pub enum RepoError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    Storage(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode task snapshot: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Encodes tasks into the snapshot wire format (JSON array).
pub fn encode_snapshot(tasks: &[Task]) -> RepoResult<Vec<u8>> {
    serde_json::to_vec(tasks).map_err(RepoError::Encode)
}

/// Decodes the snapshot wire format.
///
/// Unlike `TaskSnapshotRepository::load_all`, malformed input is an error here.
pub fn decode_snapshot(bytes: &[u8]) -> RepoResult<Vec<Task>> {
    serde_json::from_slice(bytes).map_err(RepoError::Decode)
}

/// Reads and writes the task snapshot through a slot storage backend.
pub struct TaskSnapshotRepository<S: SnapshotStorage> {
    storage: S,
    slot_key: String,
}

impl<S: SnapshotStorage> TaskSnapshotRepository<S> {
    /// Creates a repository using `DEFAULT_TASKS_SLOT`.
    pub fn new(storage: S) -> Self {
        Self::with_slot_key(storage, DEFAULT_TASKS_SLOT)
    }

    pub fn with_slot_key(storage: S, slot_key: impl Into<String>) -> Self {
        Self {
            storage,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the stored sequence.
    ///
    /// A missing slot or a malformed snapshot counts as "no saved state" and
    /// yields an empty sequence. Storage read failures are returned: the
    /// snapshot may still be intact, so callers must not overwrite it.
    ///
    /// # Side effects
    /// - Emits `tasks_load` at `warn` when a snapshot exists but cannot be
    ///   decoded, and at `error` when the slot cannot be read.
    pub fn load_all(&self) -> RepoResult<Vec<Task>> {
        let bytes = match self.storage.read_slot(&self.slot_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(
                    "event=tasks_load module=repo status=empty slot={}",
                    self.slot_key
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=repo status=error slot={} error={}",
                    self.slot_key, err
                );
                return Err(err.into());
            }
        };

        match decode_snapshot(&bytes) {
            Ok(tasks) => {
                debug!(
                    "event=tasks_load module=repo status=ok slot={} count={}",
                    self.slot_key,
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=degraded slot={} bytes={} error={}",
                    self.slot_key,
                    bytes.len(),
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    /// Loads the stored sequence, surfacing decode errors as well.
    ///
    /// A missing slot is `Ok(vec![])`.
    pub fn try_load_all(&self) -> RepoResult<Vec<Task>> {
        match self.storage.read_slot(&self.slot_key)? {
            Some(bytes) => decode_snapshot(&bytes),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the stored snapshot with `tasks`.
    pub fn persist(&self, tasks: &[Task]) -> RepoResult<()> {
        let payload = encode_snapshot(tasks)?;
        self.storage.write_slot(&self.slot_key, &payload)?;
        debug!(
            "event=tasks_persist module=repo status=ok slot={} count={} bytes={}",
            self.slot_key,
            tasks.len(),
            payload.len()
        );
        Ok(())
    }
}
