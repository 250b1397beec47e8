//! Opening the slot database.
//!
//! # Invariants
//! - Returned connections are at `SCHEMA_VERSION`.
//! - Every open attempt emits exactly one terminal `db_open` event.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// DDL that moves the slot schema from version `i` to `i + 1`.
const SCHEMA_STEPS: &[&str] = &[include_str!("kv_slots_v1.sql")];

/// Slot schema version written by this build.
pub const SCHEMA_VERSION: u32 = SCHEMA_STEPS.len() as u32;

/// Reads the slot schema version stored in the database header.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Opens the slot database at `path`, creating or upgrading `kv_slots`.
///
/// # Errors
/// - `SchemaTooNew` when the file was written by a newer build; the file is
///   left untouched.
///
/// # Side effects
/// - Creates the database file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory slot database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    upgrade_schema(conn)
}

fn upgrade_schema(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (step, ddl) in (1..).zip(SCHEMA_STEPS).skip(found as usize) {
        tx.execute_batch(ddl)?;
        tx.pragma_update(None, "user_version", step)?;
    }
    tx.commit()?;
    info!("event=db_schema module=db status=upgraded from={found} to={SCHEMA_VERSION}");
    Ok(())
}
