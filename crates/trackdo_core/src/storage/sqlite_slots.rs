//! SQLite-backed snapshot slots.
//!
//! # Invariants
//! - Each write is a single upsert statement, so SQLite's implicit
//!   transaction makes the replacement atomic.
//! - The connection must come from `db::open_db*` so `kv_slots` exists.

use super::{validate_slot_key, SnapshotStorage, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Slot storage over the `kv_slots` table.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotStorage for SqliteSlotStorage<'_> {
    fn read_slot(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_slot_key(key)?;
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, key: &str, payload: &[u8]) -> StorageResult<()> {
        validate_slot_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, payload)
             VALUES (?1, ?2)
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, payload],
        )?;
        Ok(())
    }
}
