use fitprompt_core::db::{open_db, open_db_in_memory};
use fitprompt_core::{KeyValueStore, SqliteKeyValueStore, StoreError};
use rusqlite::Connection;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[test]
fn get_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    assert_eq!(store.get("darkMode").unwrap(), None);
}

#[test]
fn set_then_get_and_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("darkMode", "true").unwrap();
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));

    store.set("darkMode", "false").unwrap();
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn values_are_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    let value = "  {\"nested\": \"quotes\" }\n";
    store.set("raw", value).unwrap();
    assert_eq!(store.get("raw").unwrap().as_deref(), Some(value));

    store.set("empty", "").unwrap();
    assert_eq!(store.get("empty").unwrap().as_deref(), Some(""));
}

#[test]
fn remove_deletes_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("coachReply", "{}").unwrap();
    store.remove("coachReply").unwrap();
    store.remove("coachReply").unwrap();
    assert_eq!(store.get("coachReply").unwrap(), None);
}

#[test]
fn keys_are_listed_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("fitnessProfile", "{}").unwrap();
    store.set("darkMode", "true").unwrap();
    store.set("coachReply", "{}").unwrap();

    assert_eq!(
        store.keys().unwrap(),
        vec!["coachReply", "darkMode", "fitnessProfile"]
    );
}

#[test]
fn blank_keys_are_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    assert!(matches!(
        store.set(" ", "x").unwrap_err(),
        StoreError::InvalidKey(_)
    ));
    assert!(matches!(
        store.get("").unwrap_err(),
        StoreError::InvalidKey(_)
    ));
    assert!(matches!(
        store.remove("\t").unwrap_err(),
        StoreError::InvalidKey(_)
    ));
}

#[test]
fn missing_table_surfaces_db_error() {
    let conn = Connection::open_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    let err = store.set("darkMode", "true").unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteKeyValueStore::new(&conn)
            .set("darkMode", "false")
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
}

#[test]
fn updated_at_is_epoch_millis_with_sub_second_resolution() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    let mut stamps = Vec::new();
    for round in 0..20 {
        let before = now_epoch_ms();
        store.set("darkMode", if round % 2 == 0 { "true" } else { "false" }).unwrap();
        let after = now_epoch_ms();

        let stamp = updated_at(&conn, "darkMode");
        assert!(
            stamp >= before - 1_000 && stamp <= after + 1_000,
            "updated_at {stamp} outside [{before}, {after}]"
        );
        stamps.push(stamp);
        std::thread::sleep(Duration::from_millis(7));
    }

    assert!(
        stamps.iter().any(|stamp| stamp % 1_000 != 0),
        "updated_at only has second resolution: {stamps:?}"
    );
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

fn updated_at(conn: &Connection, key: &str) -> i64 {
    conn.query_row(
        "SELECT updated_at FROM kv_entries WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .unwrap()
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap()
}
