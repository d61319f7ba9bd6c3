use assetbook_core::db::open_ledger_in_memory;
use assetbook_core::{execute, InvokeError, Operation, SqliteKeyValueStore};

fn parse(name: &str, args: &[&str]) -> Operation {
    let args: Vec<String> = args.iter().map(|value| value.to_string()).collect();
    Operation::parse(name, &args).unwrap()
}

#[test]
fn init_then_query_returns_stable_payloads() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(execute(&store, &parse("initLedger", &[])).unwrap(), None);

    let first = execute(&store, &parse("query", &["asset1"])).unwrap().unwrap();
    let second = execute(&store, &parse("query", &["asset1"])).unwrap().unwrap();
    assert_eq!(first, second);

    let json: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(json["kind"], "asset");
    assert_eq!(json["owner"], "owner1");
    assert_eq!(json["value"], 100);
}

#[test]
fn create_operations_persist_queryable_records() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    execute(&store, &parse("createParticipant", &["owner9", "Dana", "Reyes"])).unwrap();
    execute(&store, &parse("createAsset", &["asset9", "450", "owner9"])).unwrap();

    let raw = execute(&store, &parse("query", &["asset9"])).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["value"], 450);
    assert_eq!(json["owner"], "owner9");
}

#[test]
fn transfer_operation_rewires_all_three_records() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    execute(&store, &parse("initLedger", &[])).unwrap();
    execute(
        &store,
        &parse("transferAsset", &["owner1", "owner2", "asset1"]),
    )
    .unwrap();

    let asset: serde_json::Value = serde_json::from_str(
        &execute(&store, &parse("query", &["asset1"])).unwrap().unwrap(),
    )
    .unwrap();
    assert_eq!(asset["owner"], "owner2");

    let owner1: serde_json::Value = serde_json::from_str(
        &execute(&store, &parse("query", &["owner1"])).unwrap().unwrap(),
    )
    .unwrap();
    assert_eq!(owner1["assets"], serde_json::json!([]));

    let owner2: serde_json::Value = serde_json::from_str(
        &execute(&store, &parse("query", &["owner2"])).unwrap().unwrap(),
    )
    .unwrap();
    assert_eq!(owner2["assets"], serde_json::json!(["asset2", "asset1"]));
}

#[test]
fn execute_surfaces_domain_error_codes() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    let err = execute(&store, &parse("query", &["missing"])).unwrap_err();
    assert_eq!(err.code(), "not_found");

    let err = execute(&store, &parse("createAsset", &["asset9", "450", "ghost"])).unwrap_err();
    assert_eq!(err.code(), "unknown_owner");

    execute(&store, &parse("initLedger", &[])).unwrap();
    let err = execute(&store, &parse("initLedger", &[])).unwrap_err();
    assert_eq!(err.code(), "duplicate_key");

    let err = execute(
        &store,
        &parse("transferAsset", &["owner2", "owner1", "asset1"]),
    )
    .unwrap_err();
    assert_eq!(err.code(), "not_owner");
    assert!(matches!(err, InvokeError::Transfer(_)));
}

#[test]
fn failure_messages_name_the_violated_precondition() {
    let conn = open_ledger_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    execute(&store, &parse("initLedger", &[])).unwrap();

    let err = execute(
        &store,
        &parse("transferAsset", &["ghost", "owner2", "asset1"]),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "participant does not exist: `ghost`");

    let err = execute(&store, &parse("query", &["missing"])).unwrap_err();
    assert_eq!(err.to_string(), "no record stored under key `missing`");
}
