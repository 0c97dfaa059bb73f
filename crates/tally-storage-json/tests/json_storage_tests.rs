use std::fs;

use rust_decimal::Decimal;
use tally_core::{storage::LedgerStorage, MAX_AMOUNT};
use tally_domain::{Ledger, Transaction, TransactionKind};
use tally_storage_json::{JsonLedgerStorage, StoragePaths};
use tempfile::tempdir;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::with_categories(["Еда", "Транспорт"]);
    ledger.transactions.push(Transaction::new(
        Decimal::new(1500, 2),
        TransactionKind::Expense,
        "Еда",
        "обед",
    ));
    ledger.transactions.push(Transaction::new(
        Decimal::new(100, 0),
        TransactionKind::Income,
        "Транспорт",
        "refund",
    ));
    ledger.transactions.push(Transaction::new(
        Decimal::from_str_exact("12345678901234.56789").expect("valid amount"),
        TransactionKind::Income,
        "Еда",
        "",
    ));
    ledger
}

fn storage_in(dir: &std::path::Path) -> JsonLedgerStorage {
    JsonLedgerStorage::new(StoragePaths {
        ledger_file: dir.join("transactions_data.json"),
        backup_root: dir.join("backups"),
    })
    .expect("create storage")
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    assert!(storage.load_ledger().expect("load").is_none());
}

#[test]
fn save_load_save_round_trips() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    let ledger = sample_ledger();

    storage.save_ledger(&ledger).expect("first save");
    let first = fs::read_to_string(storage.ledger_path()).expect("read first");
    let loaded = storage.load_ledger().expect("load").expect("ledger present");
    assert_eq!(loaded, ledger);

    storage.save_ledger(&loaded).expect("second save");
    let second = fs::read_to_string(storage.ledger_path()).expect("read second");
    assert_eq!(first, second);
}

#[test]
fn large_amounts_reload_exactly() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    let mut ledger = Ledger::new();
    for amount in [MAX_AMOUNT, Decimal::MAX, Decimal::new(1, 28)] {
        ledger
            .transactions
            .push(Transaction::new(amount, TransactionKind::Expense, "Other", ""));
    }

    storage.save_ledger(&ledger).expect("save");
    let raw = fs::read_to_string(storage.ledger_path()).expect("read");
    assert!(raw.contains("\"amount\": -79228162514264337593543950335,"));
    assert!(raw.contains("\"amount\": -0.0000000000000000000000000001,"));

    let loaded = storage.load_ledger().expect("load").expect("ledger present");
    assert_eq!(loaded, ledger);
}

#[test]
fn saved_document_keeps_non_ascii_and_shape() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    storage.save_ledger(&sample_ledger()).expect("save");

    let raw = fs::read_to_string(storage.ledger_path()).expect("read");
    assert!(raw.contains("\"Еда\""));
    assert!(raw.contains("\n    \"transactions\""));

    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert!(value["transactions"][0]["amount"].is_number());
    assert_eq!(value["transactions"][0]["amount"].as_f64(), Some(-15.0));
    assert_eq!(value["categories"][1], "Транспорт");
}

#[test]
fn legacy_document_without_ids_loads() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    fs::write(
        storage.ledger_path(),
        r#"{
    "transactions": [
        {"amount": 250.0, "category": "Еда", "description": "зарплата"},
        {"amount": -99.9, "category": "Еда", "description": ""}
    ]
}"#,
    )
    .expect("write legacy file");

    let ledger = storage.load_ledger().expect("load").expect("present");
    assert_eq!(ledger.transactions.len(), 2);
    assert_eq!(ledger.transactions[1].amount, Decimal::new(-999, 1));
    assert_ne!(ledger.transactions[0].id, ledger.transactions[1].id);
    assert_eq!(ledger.categories.len(), 5);
}

#[test]
fn corrupt_document_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    fs::write(storage.ledger_path(), "{ not json").expect("write garbage");
    let err = storage.load_ledger().expect_err("corrupt file");
    assert!(err.to_string().starts_with("Serialization error"));
}

#[test]
fn backups_restore_and_prune() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::with_retention(
        StoragePaths::beside(dir.path().join("transactions_data.json")),
        2,
    )
    .expect("create storage");

    let original = sample_ledger();
    storage.save_ledger(&original).expect("save");
    let first = storage
        .backup_ledger(&original, Some("Before cleanup"))
        .expect("backup");
    assert!(first.id.contains("before-cleanup"));
    assert!(first.path.starts_with(dir.path().join("backups")));

    let mut changed = original.clone();
    changed.transactions.clear();
    storage.save_ledger(&changed).expect("save changed");

    let restored = storage.restore_backup(&first).expect("restore");
    assert_eq!(restored, original);
    let on_disk = storage.load_ledger().expect("load").expect("present");
    assert_eq!(on_disk, original);

    storage.backup_ledger(&changed, None).expect("second backup");
    storage.backup_stored(Some("raw")).expect("third backup");
    let backups = storage.list_backups().expect("list");
    assert_eq!(backups.len(), 2);
}

#[test]
fn backup_stored_copies_unreadable_file_verbatim() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    assert!(storage.backup_stored(None).expect("nothing stored").is_none());

    fs::write(storage.ledger_path(), "garbage").expect("write garbage");
    let info = storage
        .backup_stored(Some("unreadable"))
        .expect("backup")
        .expect("file existed");
    assert_eq!(fs::read_to_string(info.path).expect("read"), "garbage");
    assert_eq!(storage.find_backup(&info.id).expect("find").id, info.id);
}

#[test]
fn restoring_missing_backup_fails() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path());
    assert!(storage.find_backup("nope.json").is_err());
}
