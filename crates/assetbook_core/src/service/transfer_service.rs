//! Asset ownership transfer protocol.
//!
//! # Responsibility
//! - Validate transfer preconditions in their fixed order.
//! - Re-assign ownership across the transferer, transferee and asset records.
//!
//! # Invariants
//! - No record is written unless every precondition holds.
//! - Writes are issued in fixed order: transferer, transferee, asset.
//! - A disagreement between an asset's owner and that owner's holdings is an
//!   integrity fault, never silently repaired.

use crate::repo::entity_repo::{EntityRepository, RepoError};
use crate::store::KeyValueStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from the ownership-transfer protocol.
#[derive(Debug)]
pub enum TransferError {
    /// Named transferer or transferee does not exist.
    UnknownParticipant(String),
    /// Named asset does not exist.
    UnknownAsset(String),
    /// Asset's current owner differs from the named transferer.
    NotOwner {
        asset_id: String,
        claimed_owner: String,
    },
    /// Asset names an owner whose holdings do not list the asset.
    InconsistentState { asset_id: String, owner_id: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParticipant(id) => write!(f, "participant does not exist: `{id}`"),
            Self::UnknownAsset(id) => write!(f, "asset does not exist: `{id}`"),
            Self::NotOwner {
                asset_id,
                claimed_owner,
            } => write!(
                f,
                "participant `{claimed_owner}` does not own asset `{asset_id}`"
            ),
            Self::InconsistentState { asset_id, owner_id } => write!(
                f,
                "asset `{asset_id}` names owner `{owner_id}` but the owner's holdings disagree"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TransferError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Transfer coordinator over the entity repository.
pub struct TransferService<'s, S: KeyValueStore> {
    repo: EntityRepository<'s, S>,
}

impl<'s, S: KeyValueStore> TransferService<'s, S> {
    /// Creates a coordinator reading and writing through `store`.
    pub fn new(store: &'s S) -> Self {
        Self {
            repo: EntityRepository::new(store),
        }
    }

    /// Re-assigns `asset_id` from `transferer_id` to `transferee_id`.
    ///
    /// Preconditions are checked in order, each with a distinct failure:
    /// transferer exists, transferee exists, asset exists, transferer owns
    /// the asset. No precondition failure mutates any record.
    pub fn transfer(
        &self,
        transferer_id: &str,
        transferee_id: &str,
        asset_id: &str,
    ) -> Result<(), TransferError> {
        if !self.repo.exists(transferer_id)? {
            return Err(TransferError::UnknownParticipant(transferer_id.to_string()));
        }
        if !self.repo.exists(transferee_id)? {
            return Err(TransferError::UnknownParticipant(transferee_id.to_string()));
        }
        if !self.repo.exists(asset_id)? {
            return Err(TransferError::UnknownAsset(asset_id.to_string()));
        }

        let mut asset = self.repo.get_asset(asset_id)?;
        if asset.owner != transferer_id {
            return Err(TransferError::NotOwner {
                asset_id: asset_id.to_string(),
                claimed_owner: transferer_id.to_string(),
            });
        }

        let mut transferer = self.repo.get_participant(transferer_id)?;
        if !transferer.release_asset(asset_id) {
            error!(
                "event=transfer_asset module=service status=error error_code=ledger_integrity asset_id={asset_id} owner_id={transferer_id}"
            );
            return Err(TransferError::InconsistentState {
                asset_id: asset_id.to_string(),
                owner_id: transferer_id.to_string(),
            });
        }

        asset.reassign(transferee_id);

        if transferer_id == transferee_id {
            // Self-transfer: one participant record receives both edits.
            transferer.receive_asset(asset_id);
            self.repo.put_participant(&transferer)?;
            self.repo.put_asset(&asset)?;
        } else {
            let mut transferee = self.repo.get_participant(transferee_id)?;
            transferee.receive_asset(asset_id);

            self.repo.put_participant(&transferer)?;
            self.repo.put_participant(&transferee)?;
            self.repo.put_asset(&asset)?;
        }

        info!(
            "event=transfer_asset module=service status=ok asset_id={asset_id} from={transferer_id} to={transferee_id}"
        );
        Ok(())
    }
}
