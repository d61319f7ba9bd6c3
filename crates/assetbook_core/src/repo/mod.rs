//! Repository layer over the key-value store seam.
//!
//! # Responsibility
//! - Provide duplicate-checked create and typed read/write access for ledger
//!   records.
//! - Own record (de)serialization at the persistence boundary.
//!
//! # Invariants
//! - Repository writes validate records before touching the store.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod entity_repo;
