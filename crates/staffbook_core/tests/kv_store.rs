use rusqlite::Connection;
use staffbook_core::db::{open_db, open_db_in_memory, DbError, SCHEMA_VERSION};
use staffbook_core::{KvStore, MemoryKvStore, SqliteKvStore, StoreError};

#[test]
fn sqlite_store_get_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.get("employees").unwrap(), None);
}

#[test]
fn sqlite_store_set_overwrites_single_row() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteKvStore::try_new(&conn).unwrap();

    store.set("employees", "[]").unwrap();
    store.set("employees", "[1]").unwrap();

    assert_eq!(store.get("employees").unwrap().as_deref(), Some("[1]"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffbook.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = SqliteKvStore::try_new(&conn).unwrap();
        store.set("employees", r#"[{"k":"v"}]"#).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    assert_eq!(
        store.get("employees").unwrap().as_deref(),
        Some(r#"[{"k":"v"}]"#)
    );
}

#[test]
fn sqlite_store_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(&conn) {
        Err(StoreError::Db(DbError::SchemaNotInitialized { found: 0, expected })) => {
            assert_eq!(expected, SCHEMA_VERSION)
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected schema error"),
    }
}

#[test]
fn sqlite_store_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    assert!(matches!(
        SqliteKvStore::try_new(&conn),
        Err(StoreError::Db(DbError::MissingKvTable))
    ));
}

#[test]
fn memory_store_quota_error_reports_sizes() {
    let mut store = MemoryKvStore::with_quota(12);
    store.set("employees", "[]").unwrap();

    let err = store.set("employees", "[1,2,3]").unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(store.get("employees").unwrap().as_deref(), Some("[]"));
}
