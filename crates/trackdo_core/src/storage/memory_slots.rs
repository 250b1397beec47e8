//! In-process snapshot slots.
//!
//! Used by tests and by hosts that opt out of durable storage. Tracks how
//! many writes succeeded and can be switched into a failing mode to exercise
//! error paths.

use super::{validate_slot_key, SnapshotStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        storage
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), payload.into());
        storage
    }

    /// Number of successful `write_slot` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every following write fail with an I/O error until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every following read fail with an I/O error until reset.
    /// Stored payloads are kept.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Returns a copy of the raw payload stored under `key`.
    pub fn raw_slot(&self, key: &str) -> Option<Vec<u8>> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl SnapshotStorage for MemorySlotStorage {
    fn read_slot(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_slot_key(key)?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "memory slot reads disabled",
            )));
        }
        Ok(self.raw_slot(key))
    }

    fn write_slot(&self, key: &str, payload: &[u8]) -> StorageResult<()> {
        validate_slot_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "memory slot writes disabled",
            )));
        }
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), payload.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
