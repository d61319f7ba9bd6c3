//! Participant domain model.
//!
//! # Responsibility
//! - Define the participant record persisted under its ledger key.
//! - Provide holdings helpers used by the transfer protocol.
//!
//! # Invariants
//! - `id` is the record's ledger key and never changes after creation.
//! - `assets` holds asset ids in acquisition order; an id appears at most
//!   once.

use crate::model::key::{validate_key, validate_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// A ledger participant that may own zero or more assets.
///
/// Holdings are asset ids, not embedded records; the asset itself is the
/// authority on its current owner and must agree with the holdings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ParticipantWire")]
pub struct Participant {
    /// Ledger key, e.g. an email or assigned identifier.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Ids of owned assets, in acquisition order.
    pub assets: Vec<String>,
}

impl Participant {
    /// Creates a participant with no holdings.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, RecordValidationError> {
        let participant = Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            assets: Vec::new(),
        };
        participant.validate()?;
        Ok(participant)
    }

    /// Checks structural invariants on this record.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_key("id", &self.id)?;
        validate_text("firstName", &self.first_name)?;
        validate_text("lastName", &self.last_name)?;
        for asset_id in &self.assets {
            validate_key("assets entry", asset_id)?;
        }
        Ok(())
    }

    /// Returns whether this participant's holdings list `asset_id`.
    pub fn holds(&self, asset_id: &str) -> bool {
        self.assets.iter().any(|held| held == asset_id)
    }

    /// Removes `asset_id` from holdings, preserving order of the rest.
    ///
    /// Returns `false` when the id was not held.
    pub fn release_asset(&mut self, asset_id: &str) -> bool {
        match self.assets.iter().position(|held| held == asset_id) {
            Some(index) => {
                self.assets.remove(index);
                true
            }
            None => false,
        }
    }

    /// Appends `asset_id` to holdings unless already present.
    pub fn receive_asset(&mut self, asset_id: impl Into<String>) {
        let asset_id = asset_id.into();
        if !self.holds(&asset_id) {
            self.assets.push(asset_id);
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantWire {
    id: String,
    first_name: String,
    last_name: String,
    assets: Vec<String>,
}

impl TryFrom<ParticipantWire> for Participant {
    type Error = RecordValidationError;

    fn try_from(wire: ParticipantWire) -> Result<Self, Self::Error> {
        let participant = Self {
            id: wire.id,
            first_name: wire.first_name,
            last_name: wire.last_name,
            assets: wire.assets,
        };
        participant.validate()?;
        Ok(participant)
    }
}
