//! Ledger host probe entry point.
//!
//! # Responsibility
//! - Play the hosting runtime: open a ledger database and dispatch one named
//!   operation with positional string arguments.
//! - Keep output deterministic for quick local sanity checks.

use assetbook_core::db::{open_ledger, open_ledger_in_memory};
use assetbook_core::{default_log_level, execute, init_logging, Operation, SqliteKeyValueStore};
use std::process::ExitCode;

const USAGE: &str = "usage: assetbook <db_path|--memory> <function> [args...]";

fn main() -> ExitCode {
    // Logging is opt-in for the probe; stdout stays reserved for payloads.
    if let Ok(log_dir) = std::env::var("ASSETBOOK_LOG_DIR") {
        let level =
            std::env::var("ASSETBOOK_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(message) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {message}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(Some(payload)) => {
            println!("{payload}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("ok");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<Option<String>, String> {
    let (target, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;
    let (function, call_args) = rest.split_first().ok_or_else(|| USAGE.to_string())?;

    let conn = if target == "--memory" {
        open_ledger_in_memory()
    } else {
        open_ledger(target)
    }
    .map_err(|err| format!("failed to open ledger: {err}"))?;

    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("ledger store not ready: {err}"))?;
    let operation = Operation::parse(function, call_args).map_err(|err| err.to_string())?;

    execute(&store, &operation).map_err(|err| err.to_string())
}
