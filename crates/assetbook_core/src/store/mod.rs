//! Key-value store seam consumed by every ledger component.
//!
//! # Responsibility
//! - Define the narrow get/put/exists contract between the core and the
//!   hosting store.
//! - Surface connection-readiness failures distinctly from I/O failures.
//!
//! # Invariants
//! - `exists` never mutates state and raises no domain errors.
//! - A key with an absent or empty stored value does not exist.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite_store;

pub use sqlite_store::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from key-value store access.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "ledger store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "ledger store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "ledger store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Narrow store contract: read a value, write a value, probe existence.
///
/// Every mutation in the core consults `exists` before writing; every read
/// goes to the store with no in-process caching.
pub trait KeyValueStore {
    /// Reads the stored value for `key`, `None` when absent.
    fn get_value(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, overwriting any existing value.
    fn put_value(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Reports whether a non-empty value is stored under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self
            .get_value(key)?
            .is_some_and(|value| !value.is_empty()))
    }
}
