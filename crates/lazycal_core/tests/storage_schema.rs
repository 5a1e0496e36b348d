use chrono::{NaiveDate, NaiveTime};
use lazycal_core::db::migrations::{latest_version, schema_version};
use lazycal_core::db::{open_db, open_db_in_memory, DbError, STORAGE_TABLE};
use lazycal_core::{CalendarService, EventDraft, KvRepository, SqliteKvRepository};
use rusqlite::Connection;

fn stamp(conn: &Connection, key: &str) -> i64 {
    SqliteKvRepository::new(conn)
        .updated_at(key)
        .unwrap()
        .unwrap()
}

#[test]
fn fresh_database_is_ready_for_calendar_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(repo.get_value("events").unwrap(), None);
    assert_eq!(repo.updated_at("events").unwrap(), None);
}

#[test]
fn saved_events_and_write_stamps_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.db");

    {
        let conn = open_db(&path).unwrap();
        let mut service = CalendarService::open(SqliteKvRepository::new(&conn));
        let draft = EventDraft {
            title: "Dentist".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10),
            start: NaiveTime::from_hms_opt(14, 0, 0),
            end: NaiveTime::from_hms_opt(15, 0, 0),
            ..EventDraft::default()
        };
        service.save_event(&draft).unwrap();
        assert!(stamp(&conn, "events") > 0);

        // Age the row so the next overwrite must move the stamp.
        conn.execute(
            "UPDATE kv_store SET updated_at = 0 WHERE key = 'events';",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(stamp(&conn, "events"), 0);

    let mut service = CalendarService::open(SqliteKvRepository::new(&conn));
    assert_eq!(service.events().len(), 1);
    let id = service.events()[0].id;
    assert!(service.delete_event(id));
    assert!(stamp(&conn, "events") > 0);
}

#[test]
fn rewriting_identical_value_keeps_stamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.put_value("events", "[]").unwrap();
    conn.execute("UPDATE kv_store SET updated_at = 5 WHERE key = 'events';", [])
        .unwrap();

    repo.put_value("events", "[]").unwrap();
    assert_eq!(stamp(&conn, "events"), 5);
}

#[test]
fn first_release_database_upgrades_and_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_store (
             key TEXT PRIMARY KEY NOT NULL,
             value TEXT NOT NULL,
             updated_at INTEGER NOT NULL DEFAULT 0
         );
         INSERT INTO kv_store (key, value, updated_at) VALUES ('events', '[]', 0);
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let repo = SqliteKvRepository::new(&conn);
    assert_eq!(repo.get_value("events").unwrap().as_deref(), Some("[]"));

    repo.put_value("events", "[{}]").unwrap();
    assert!(stamp(&conn, "events") > 0);
}

#[test]
fn foreign_database_without_storage_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE notes (id INTEGER); PRAGMA user_version = 1;")
        .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::MissingStorageTable { schema_version } => assert_eq!(schema_version, 1),
        other => panic!("unexpected error: {other}"),
    }
    let err = open_db(&path).unwrap_err();
    assert!(err.to_string().contains(STORAGE_TABLE));
}

#[test]
fn database_from_newer_release_is_not_touched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 999);
}
