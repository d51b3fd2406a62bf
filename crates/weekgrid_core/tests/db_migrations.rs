use rusqlite::Connection;
use weekgrid_core::db::migrations::latest_version;
use weekgrid_core::db::{open_db, open_db_in_memory, DbError};
use weekgrid_core::{KeyValueStore, SqliteKeyValueStore, StoreError};

#[test]
fn in_memory_database_is_migrated_to_latest() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn reopening_a_file_keeps_schema_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.sqlite3");

    let conn = open_db(&path).unwrap();
    SqliteKeyValueStore::try_new(&conn)
        .unwrap()
        .set("tasks", "[]")
        .unwrap();
    drop(conn);

    let reopened = open_db(&path).unwrap();
    assert_eq!(schema_version(&reopened), latest_version());
    let store = SqliteKeyValueStore::try_new(&reopened).unwrap();
    assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.code(), "db_schema_too_new");
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_refuses_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    match SqliteKeyValueStore::try_new(&conn) {
        Err(StoreError::MissingRequiredTable(table)) => assert_eq!(table, "kv_entries"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be rejected"),
    }
}

#[test]
fn upsert_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(store.updated_at("weekly-events").unwrap(), None);

    store.set("weekly-events", "[]").unwrap();
    conn.execute(
        "UPDATE kv_entries SET updated_at = 0 WHERE key = 'weekly-events';",
        [],
    )
    .unwrap();
    store.set("weekly-events", "[ ]").unwrap();

    assert!(store.updated_at("weekly-events").unwrap().unwrap() > 0);
    assert_eq!(store.get("weekly-events").unwrap().as_deref(), Some("[ ]"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    exists == 1
}
