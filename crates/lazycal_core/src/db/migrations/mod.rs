//! Versioned schema steps for the key-value storage table.
//!
//! Each step runs in its own transaction and stamps `user_version` on
//! commit, so an interrupted upgrade resumes from the last finished step.

use crate::db::{DbError, DbResult, STORAGE_TABLE};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs in ascending version order.
const STEPS: [(u32, &str); 2] = [
    (1, include_str!("0001_kv_store.sql")),
    (2, include_str!("0002_kv_store_touch.sql")),
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    STEPS[STEPS.len() - 1].0
}

/// Reads the schema version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Checks the storage table, then upgrades `conn` to [`latest_version`].
///
/// # Errors
/// - [`DbError::SchemaTooNew`] when a newer release wrote the file.
/// - [`DbError::MissingStorageTable`] when the file is stamped with a
///   schema version but the storage table is absent.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }
    if found > 0 && !storage_table_exists(conn)? {
        return Err(DbError::MissingStorageTable {
            schema_version: found,
        });
    }

    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!("event=db_migrate module=db status=ok version={version}");
    }
    Ok(())
}

fn storage_table_exists(conn: &Connection) -> DbResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [STORAGE_TABLE],
        |row| row.get(0),
    )?;
    Ok(exists)
}
