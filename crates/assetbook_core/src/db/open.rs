//! Connection bootstrap for the SQLite ledger.
//!
//! # Responsibility
//! - Open file or in-memory ledger connections.
//! - Configure connection pragmas and apply migrations before handing the
//!   connection out.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a ledger database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `ledger_open` events with duration and status.
pub fn open_ledger(path: impl AsRef<Path>) -> DbResult<Connection> {
    bootstrapped(|| Connection::open(path), "file")
}

/// Opens an in-memory ledger database and applies all pending migrations.
///
/// # Side effects
/// - Emits `ledger_open` events with duration and status.
pub fn open_ledger_in_memory() -> DbResult<Connection> {
    bootstrapped(Connection::open_in_memory, "memory")
}

fn bootstrapped(
    open: impl FnOnce() -> rusqlite::Result<Connection>,
    mode: &str,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=ledger_open module=db status=start mode={mode}");

    let outcome = open().map_err(Into::into).and_then(|mut conn| {
        configure_and_migrate(&mut conn)?;
        Ok(conn)
    });

    match &outcome {
        Ok(_) => info!(
            "event=ledger_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=ledger_open module=db status=error mode={mode} duration_ms={} error_code=ledger_open_failed error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    outcome
}

fn configure_and_migrate(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
