use assetbook_core::db::open_ledger_in_memory;
use assetbook_core::{
    Asset, EntityRepository, Participant, SqliteKeyValueStore, TransferError, TransferService,
};
use rusqlite::Connection;

/// Seeds one participant holding `asset_ids` with consistent cross-references.
fn insert_holder(
    repo: &EntityRepository<'_, SqliteKeyValueStore<'_>>,
    owner_id: &str,
    asset_ids: &[(&str, i64)],
) {
    let mut participant = Participant::new(owner_id, "Test", "Holder").unwrap();
    for (asset_id, value) in asset_ids {
        let asset = Asset::new(*asset_id, *value, owner_id).unwrap();
        participant.receive_asset(asset.id.clone());
        repo.insert_asset(&asset).unwrap();
    }
    repo.insert_participant(&participant).unwrap();
}

#[test]
fn transfer_moves_asset_between_participants() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);
    insert_holder(&repo, "ownerA", &[("assetX", 100)]);
    insert_holder(&repo, "ownerB", &[]);

    TransferService::new(&store)
        .transfer("ownerA", "ownerB", "assetX")
        .unwrap();

    let transferer = repo.get_participant("ownerA").unwrap();
    let transferee = repo.get_participant("ownerB").unwrap();
    let asset = repo.get_asset("assetX").unwrap();

    assert!(!transferer.holds("assetX"));
    assert_eq!(
        transferee
            .assets
            .iter()
            .filter(|held| held.as_str() == "assetX")
            .count(),
        1
    );
    assert_eq!(asset.owner, "ownerB");
    assert_eq!(asset.value, 100);
}

#[test]
fn transfer_appends_to_existing_holdings() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);
    insert_holder(&repo, "ownerA", &[("assetX", 100)]);
    insert_holder(&repo, "ownerB", &[("assetY", 200)]);

    TransferService::new(&store)
        .transfer("ownerA", "ownerB", "assetX")
        .unwrap();

    let transferee = repo.get_participant("ownerB").unwrap();
    assert_eq!(transferee.assets, vec!["assetY", "assetX"]);
}

#[test]
fn preconditions_fail_in_declared_order() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);
    let service = TransferService::new(&store);

    // Everything absent: the transferer check fires first.
    let err = service.transfer("ghostA", "ghostB", "ghostX").unwrap_err();
    assert!(matches!(err, TransferError::UnknownParticipant(id) if id == "ghostA"));

    insert_holder(&repo, "ownerA", &[("assetX", 100)]);

    let err = service.transfer("ownerA", "ghostB", "ghostX").unwrap_err();
    assert!(matches!(err, TransferError::UnknownParticipant(id) if id == "ghostB"));

    insert_holder(&repo, "ownerB", &[]);

    let err = service.transfer("ownerA", "ownerB", "ghostX").unwrap_err();
    assert!(matches!(err, TransferError::UnknownAsset(id) if id == "ghostX"));
}

#[test]
fn not_owner_leaves_all_records_unchanged() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);
    insert_holder(&repo, "ownerA", &[("assetX", 100)]);
    insert_holder(&repo, "ownerB", &[]);

    let before_a = repo.get_raw("ownerA").unwrap();
    let before_b = repo.get_raw("ownerB").unwrap();
    let before_x = repo.get_raw("assetX").unwrap();

    // ownerB exists but does not own assetX.
    let err = TransferService::new(&store)
        .transfer("ownerB", "ownerA", "assetX")
        .unwrap_err();
    assert!(matches!(
        err,
        TransferError::NotOwner {
            ref asset_id,
            ref claimed_owner,
        } if asset_id == "assetX" && claimed_owner == "ownerB"
    ));

    assert_eq!(repo.get_raw("ownerA").unwrap(), before_a);
    assert_eq!(repo.get_raw("ownerB").unwrap(), before_b);
    assert_eq!(repo.get_raw("assetX").unwrap(), before_x);
}

#[test]
fn holdings_disagreement_is_an_integrity_fault() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);

    // createAsset writes only the asset record, so the owner's holdings
    // never learn about assetX.
    repo.create_participant("ownerA", "Dana", "Reyes").unwrap();
    repo.create_participant("ownerB", "Eli", "Nguyen").unwrap();
    repo.create_asset("assetX", 100, "ownerA").unwrap();

    let before_a = repo.get_raw("ownerA").unwrap();
    let before_b = repo.get_raw("ownerB").unwrap();
    let before_x = repo.get_raw("assetX").unwrap();

    let err = TransferService::new(&store)
        .transfer("ownerA", "ownerB", "assetX")
        .unwrap_err();
    assert!(matches!(
        err,
        TransferError::InconsistentState {
            ref asset_id,
            ref owner_id,
        } if asset_id == "assetX" && owner_id == "ownerA"
    ));

    assert_eq!(repo.get_raw("ownerA").unwrap(), before_a);
    assert_eq!(repo.get_raw("ownerB").unwrap(), before_b);
    assert_eq!(repo.get_raw("assetX").unwrap(), before_x);
}

#[test]
fn self_transfer_keeps_exactly_one_holding() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);
    insert_holder(&repo, "ownerA", &[("assetX", 100)]);

    TransferService::new(&store)
        .transfer("ownerA", "ownerA", "assetX")
        .unwrap();

    let participant = repo.get_participant("ownerA").unwrap();
    assert_eq!(participant.assets, vec!["assetX"]);
    assert_eq!(repo.get_asset("assetX").unwrap().owner, "ownerA");
}

#[test]
fn sequential_transfers_round_trip_ownership() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = EntityRepository::new(&store);
    insert_holder(&repo, "ownerA", &[("assetX", 100)]);
    insert_holder(&repo, "ownerB", &[]);
    let service = TransferService::new(&store);

    service.transfer("ownerA", "ownerB", "assetX").unwrap();
    service.transfer("ownerB", "ownerA", "assetX").unwrap();

    let back = repo.get_participant("ownerA").unwrap();
    assert_eq!(back.assets, vec!["assetX"]);
    assert!(repo.get_participant("ownerB").unwrap().assets.is_empty());
    assert_eq!(repo.get_asset("assetX").unwrap().owner, "ownerA");

    // The old owner cannot transfer what it no longer holds.
    let err = service.transfer("ownerB", "ownerA", "assetX").unwrap_err();
    assert!(matches!(err, TransferError::NotOwner { .. }));
}

#[test]
fn transfer_requires_ready_store() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(SqliteKeyValueStore::try_new(&conn).is_err());
}
