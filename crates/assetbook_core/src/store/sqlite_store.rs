//! SQLite implementation of the key-value store seam.
//!
//! # Responsibility
//! - Map get/put/exists onto the canonical `ledger_entries` table.
//! - Verify connection readiness (schema version, table shape) at
//!   construction time.
//!
//! # Invariants
//! - Every `put_value` is a single row write stamping `updated_at`.
//! - Reads never mutate state.

use crate::db::migrations::latest_version;
use crate::store::{KeyValueStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

const LEDGER_TABLE: &str = "ledger_entries";
const LEDGER_COLUMNS: &[&str] = &["key", "value", "updated_at"];

/// SQLite-backed key-value store over a migrated connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_value(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM ledger_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_value(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO ledger_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT (key) DO UPDATE
             SET value = excluded.value,
                 updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM ledger_entries
                WHERE key = ?1
                  AND value <> ''
            );",
            [key],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, LEDGER_TABLE)? {
        return Err(StoreError::MissingRequiredTable(LEDGER_TABLE));
    }

    for &column in LEDGER_COLUMNS {
        if !table_has_column(conn, LEDGER_TABLE, column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: LEDGER_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
