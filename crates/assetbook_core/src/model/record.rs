//! Tagged union over the ledger's record kinds.
//!
//! # Responsibility
//! - Give reads a way to decode a ledger value whose kind the caller must
//!   infer.
//! - Pin the `kind` discriminant written into every stored encoding.

use crate::model::asset::Asset;
use crate::model::participant::Participant;
use serde::{Deserialize, Serialize};

/// Any record the ledger can hold, discriminated by the wire `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Record {
    Participant(Participant),
    Asset(Asset),
}

impl Record {
    /// Ledger key this record is stored under.
    pub fn key(&self) -> &str {
        match self {
            Self::Participant(participant) => &participant.id,
            Self::Asset(asset) => &asset.id,
        }
    }

    /// Stable kind label matching the wire discriminant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Participant(_) => "participant",
            Self::Asset(_) => "asset",
        }
    }
}

impl From<Participant> for Record {
    fn from(value: Participant) -> Self {
        Self::Participant(value)
    }
}

impl From<Asset> for Record {
    fn from(value: Asset) -> Self {
        Self::Asset(value)
    }
}
