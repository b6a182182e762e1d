//! SQLite-backed blob store over the `kv_entries` table.

use super::{KvStore, StoreResult};
use crate::db::check_schema;
use rusqlite::{params, Connection, OptionalExtension};

/// Durable store borrowing a connection from `db::open_db` or
/// `db::open_db_in_memory`.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// # Errors
    /// `StoreError::Db` with `SchemaNotInitialized` or `MissingKvTable` when
    /// the connection did not come from `db::open_*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        check_schema(conn)?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
