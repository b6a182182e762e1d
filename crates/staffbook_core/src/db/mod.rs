//! SQLite connections backing the durable blob store.
//!
//! # Responsibility
//! - Open file or in-memory connections with the `kv_entries` schema in place.
//! - Refuse files written by a newer schema version.
//!
//! # Invariants
//! - `kv_entries` is never read or written before `ensure_schema` succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{schema_version, KV_TABLE, SCHEMA_VERSION};
pub(crate) use schema::check_schema;

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or checking the store database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was stamped by a newer build; it is left untouched.
    NewerSchema { found: u32, supported: u32 },
    /// The connection was not opened through `open_db`/`open_db_in_memory`.
    SchemaNotInitialized { found: u32, expected: u32 },
    /// Version stamp is current but `kv_entries` is gone.
    MissingKvTable,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NewerSchema { found, supported } => write!(
                f,
                "store database schema {found} is newer than supported {supported}"
            ),
            Self::SchemaNotInitialized { found, expected } => write!(
                f,
                "store database schema is {found}, expected {expected}"
            ),
            Self::MissingKvTable => write!(f, "store database has no {} table", schema::KV_TABLE),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
