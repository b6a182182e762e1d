//! Schema of the durable blob store: a single `kv_entries` table.
//!
//! # Invariants
//! - `PRAGMA user_version` is `0` for a fresh file and `SCHEMA_VERSION`
//!   once `kv_entries` exists.
//! - Files stamped with a newer version are never touched.

use super::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

/// Schema version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

/// Table holding one row per store key.
pub const KV_TABLE: &str = "kv_entries";

const CREATE_KV_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Creates `kv_entries` on a fresh database and stamps the version.
///
/// Returns `NewerSchema` when the file was written by a newer build.
pub(crate) fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::NewerSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_KV_TABLE)?;
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        tx.commit()?;
        debug!("event=db_schema module=db status=created from={found} to={SCHEMA_VERSION}");
    }

    check_schema(conn)
}

/// Verifies that `conn` carries the current schema without changing it.
pub(crate) fn check_schema(conn: &Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found != SCHEMA_VERSION {
        return Err(DbError::SchemaNotInitialized {
            found,
            expected: SCHEMA_VERSION,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(DbError::MissingKvTable);
    }
    Ok(())
}
