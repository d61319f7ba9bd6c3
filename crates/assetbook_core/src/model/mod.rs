//! Domain model for ledger-resident records.
//!
//! # Responsibility
//! - Define the canonical participant/asset record shapes and their wire
//!   encoding.
//! - Validate ledger keys and record fields before persistence.
//!
//! # Invariants
//! - Every record is identified by a caller-supplied ledger key.
//! - Cross-references between records are ids only; the store is the single
//!   system of record and ids are resolved on demand.

pub mod asset;
pub mod key;
pub mod participant;
pub mod record;
