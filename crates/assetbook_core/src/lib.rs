//! Core domain logic for the assetbook ledger.
//! This crate is the single source of truth for ownership invariants.

pub mod db;
pub mod invoke;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use invoke::{execute, InvokeError, Operation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::asset::Asset;
pub use model::key::RecordValidationError;
pub use model::participant::Participant;
pub use model::record::Record;
pub use repo::entity_repo::{EntityRepository, RepoError, RepoResult};
pub use service::bootstrap::seed_ledger;
pub use service::transfer_service::{TransferError, TransferService};
pub use store::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
