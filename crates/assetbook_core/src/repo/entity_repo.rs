//! Entity repository contracts over the key-value ledger.
//!
//! # Responsibility
//! - Create, read and overwrite participant/asset records by ledger key.
//! - Keep wire encoding/decoding inside the persistence boundary.
//!
//! # Invariants
//! - No create succeeds when the target key already holds a non-empty value.
//! - `create_asset` requires the referenced owner to exist and writes exactly
//!   one record.
//! - Every write is a single store put.

use crate::model::asset::Asset;
use crate::model::key::RecordValidationError;
use crate::model::participant::Participant;
use crate::model::record::Record;
use crate::store::{KeyValueStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from ledger record persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed structural validation before a write.
    Validation(RecordValidationError),
    /// Underlying store failure.
    Store(StoreError),
    /// Target key already holds a record.
    DuplicateKey(String),
    /// Referenced owner participant does not exist.
    UnknownOwner(String),
    /// No record stored under the requested key.
    NotFound(String),
    /// Persisted data cannot be decoded into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::DuplicateKey(key) => write!(f, "a record already exists under key `{key}`"),
            Self::UnknownOwner(id) => write!(f, "owner participant does not exist: `{id}`"),
            Self::NotFound(key) => write!(f, "no record stored under key `{key}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted ledger data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::DuplicateKey(_) => None,
            Self::UnknownOwner(_) => None,
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Ledger record repository over any key-value store implementation.
pub struct EntityRepository<'s, S: KeyValueStore> {
    store: &'s S,
}

impl<'s, S: KeyValueStore> EntityRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Reports whether a record exists under `key`.
    pub fn exists(&self, key: &str) -> RepoResult<bool> {
        Ok(self.store.exists(key)?)
    }

    /// Creates a participant with empty holdings under its id.
    pub fn create_participant(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<()> {
        let participant = Participant::new(id, first_name, last_name)?;
        self.insert_participant(&participant)
    }

    /// Creates an asset owned by an existing participant.
    ///
    /// Writes the asset record only; the owner's holdings are maintained by
    /// the seed procedure and by transfers.
    pub fn create_asset(&self, id: &str, value: i64, owner_id: &str) -> RepoResult<()> {
        let asset = Asset::new(id, value, owner_id)?;
        if self.store.exists(&asset.id)? {
            return Err(RepoError::DuplicateKey(asset.id.clone()));
        }
        if !self.store.exists(owner_id)? {
            return Err(RepoError::UnknownOwner(owner_id.to_string()));
        }
        self.put_asset(&asset)
    }

    /// Writes a validated participant unless its key is already taken.
    pub fn insert_participant(&self, participant: &Participant) -> RepoResult<()> {
        participant.validate()?;
        if self.store.exists(&participant.id)? {
            return Err(RepoError::DuplicateKey(participant.id.clone()));
        }
        self.put_participant(participant)
    }

    /// Writes a validated asset unless its key is already taken.
    pub fn insert_asset(&self, asset: &Asset) -> RepoResult<()> {
        asset.validate()?;
        if self.store.exists(&asset.id)? {
            return Err(RepoError::DuplicateKey(asset.id.clone()));
        }
        self.put_asset(asset)
    }

    /// Returns the stored encoding verbatim.
    pub fn get_raw(&self, key: &str) -> RepoResult<String> {
        if !self.store.exists(key)? {
            return Err(RepoError::NotFound(key.to_string()));
        }
        match self.store.get_value(key)? {
            Some(value) => Ok(value),
            None => Err(RepoError::NotFound(key.to_string())),
        }
    }

    /// Decodes the record stored under `key`, inferring its kind.
    pub fn get_record(&self, key: &str) -> RepoResult<Record> {
        let raw = self.get_raw(key)?;
        serde_json::from_str(&raw).map_err(|err| {
            RepoError::InvalidData(format!("record under key `{key}` failed to decode: {err}"))
        })
    }

    /// Loads the participant stored under `id`.
    pub fn get_participant(&self, id: &str) -> RepoResult<Participant> {
        match self.get_record(id)? {
            Record::Participant(participant) => Ok(participant),
            other => Err(RepoError::InvalidData(format!(
                "record under key `{id}` is a {}, expected a participant",
                other.kind()
            ))),
        }
    }

    /// Loads the asset stored under `id`.
    pub fn get_asset(&self, id: &str) -> RepoResult<Asset> {
        match self.get_record(id)? {
            Record::Asset(asset) => Ok(asset),
            other => Err(RepoError::InvalidData(format!(
                "record under key `{id}` is a {}, expected an asset",
                other.kind()
            ))),
        }
    }

    /// Serializes and writes a participant, overwriting any existing record.
    pub fn put_participant(&self, participant: &Participant) -> RepoResult<()> {
        participant.validate()?;
        let encoded = encode_record(&Record::Participant(participant.clone()))?;
        self.store.put_value(&participant.id, &encoded)?;
        Ok(())
    }

    /// Serializes and writes an asset, overwriting any existing record.
    pub fn put_asset(&self, asset: &Asset) -> RepoResult<()> {
        asset.validate()?;
        let encoded = encode_record(&Record::Asset(asset.clone()))?;
        self.store.put_value(&asset.id, &encoded)?;
        Ok(())
    }
}

fn encode_record(record: &Record) -> RepoResult<String> {
    serde_json::to_string(record).map_err(|err| {
        RepoError::InvalidData(format!(
            "record under key `{}` failed to encode: {err}",
            record.key()
        ))
    })
}
