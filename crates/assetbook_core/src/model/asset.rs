//! Asset domain model.
//!
//! # Responsibility
//! - Define the asset record persisted under its ledger key.
//!
//! # Invariants
//! - `id` is the record's ledger key and never changes after creation.
//! - `owner` names exactly one participant; it is repointed only by the
//!   transfer protocol.
//! - `value` is round-tripped without interpretation.

use crate::model::key::{validate_key, RecordValidationError};
use serde::{Deserialize, Serialize};

/// A ledger asset with exactly one current owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AssetWire")]
pub struct Asset {
    /// Ledger key of this asset.
    pub id: String,
    /// Domain-specific numeric attribute, opaque to the core.
    pub value: i64,
    /// Ledger key of the owning participant.
    pub owner: String,
}

impl Asset {
    /// Creates an asset owned by `owner`.
    pub fn new(
        id: impl Into<String>,
        value: i64,
        owner: impl Into<String>,
    ) -> Result<Self, RecordValidationError> {
        let asset = Self {
            id: id.into(),
            value,
            owner: owner.into(),
        };
        asset.validate()?;
        Ok(asset)
    }

    /// Checks structural invariants on this record.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_key("id", &self.id)?;
        validate_key("owner", &self.owner)?;
        Ok(())
    }

    /// Repoints this asset at a new owning participant.
    pub fn reassign(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }
}

#[derive(Deserialize)]
struct AssetWire {
    id: String,
    value: i64,
    owner: String,
}

impl TryFrom<AssetWire> for Asset {
    type Error = RecordValidationError;

    fn try_from(wire: AssetWire) -> Result<Self, Self::Error> {
        let asset = Self {
            id: wire.id,
            value: wire.value,
            owner: wire.owner,
        };
        asset.validate()?;
        Ok(asset)
    }
}
