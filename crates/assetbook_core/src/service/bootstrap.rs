//! Fixed seed procedure for a fresh ledger.
//!
//! # Responsibility
//! - Create the three fixed participant/asset pairs a new ledger starts with.
//!
//! # Invariants
//! - Each asset is appended to its owner's holdings before either record is
//!   persisted; one store write per record.
//! - Re-running against a non-fresh ledger fails on the first occupied key.

use crate::model::asset::Asset;
use crate::model::participant::Participant;
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use crate::store::KeyValueStore;
use log::info;

const SEED_PARTICIPANTS: [(&str, &str, &str); 3] = [
    ("owner1", "Amy", "Williams"),
    ("owner2", "Brad", "Johnson"),
    ("owner3", "Carla", "Suarez"),
];

const SEED_ASSETS: [(&str, i64); 3] = [("asset1", 100), ("asset2", 200), ("asset3", 300)];

/// Seeds the ledger with its fixed participants and assets.
pub fn seed_ledger<S: KeyValueStore>(repo: &EntityRepository<'_, S>) -> RepoResult<()> {
    for ((owner_id, first_name, last_name), (asset_id, value)) in
        SEED_PARTICIPANTS.iter().zip(SEED_ASSETS.iter())
    {
        let mut participant = Participant::new(*owner_id, *first_name, *last_name)?;
        let asset = Asset::new(*asset_id, *value, *owner_id)?;
        participant.receive_asset(asset.id.clone());

        repo.insert_participant(&participant)?;
        repo.insert_asset(&asset)?;
    }

    info!(
        "event=seed_ledger module=service status=ok participants={} assets={}",
        SEED_PARTICIPANTS.len(),
        SEED_ASSETS.len()
    );
    Ok(())
}
