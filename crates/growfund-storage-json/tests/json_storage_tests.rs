use std::fs;

use chrono::NaiveDate;
use growfund_core::storage::{FundStorage, RemoteMirror};
use growfund_domain::{FundBook, Shareholder, CURRENT_SCHEMA_VERSION};
use growfund_storage_json::{DirMirror, JsonFundStorage, StoragePaths};
use tempfile::TempDir;

fn storage_with_temp_dir() -> (JsonFundStorage, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let paths = StoragePaths {
        fund_root: temp.path().join("funds"),
        backup_root: temp.path().join("backups"),
    };
    let storage = JsonFundStorage::with_retention(paths, 3).expect("json storage");
    (storage, temp)
}

fn sample_fund() -> FundBook {
    let mut fund = FundBook::new("Village Fund");
    fund.add_shareholder(Shareholder::new(
        "SH001",
        "Asha",
        "9000000001",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ));
    fund
}

#[test]
fn save_and_load_roundtrip() {
    let (storage, _guard) = storage_with_temp_dir();
    let fund = sample_fund();
    storage.save_fund("village", &fund).expect("save fund");

    let report = storage.load_fund("village").expect("load fund");
    assert_eq!(report.fund.name, "Village Fund");
    assert_eq!(report.fund.shareholders.len(), 1);
    assert!(report.warnings.is_empty());
    assert!(report.migrations.is_empty());
}

#[test]
fn names_are_slugged_on_disk() {
    let (storage, _guard) = storage_with_temp_dir();
    let fund = sample_fund();
    storage.save_fund("Village Fund 2024", &fund).expect("save");
    let path = storage.fund_path("Village Fund 2024");
    assert!(path.ends_with("village_fund_2024.json"), "got {path:?}");
    assert!(path.exists());
}

#[test]
fn resaving_creates_backups_and_prunes_to_retention() {
    let (storage, _guard) = storage_with_temp_dir();
    let fund = sample_fund();
    for _ in 0..6 {
        storage.save_fund("village", &fund).expect("save");
    }
    let backups = storage.list_backups("village").expect("list backups");
    assert!(!backups.is_empty());
    assert!(backups.len() <= 3, "retention not applied: {}", backups.len());
}

#[test]
fn explicit_backup_carries_the_note_and_restores() {
    let (storage, _guard) = storage_with_temp_dir();
    let mut fund = sample_fund();
    storage.save_fund("village", &fund).expect("save");

    let info = storage
        .backup_fund("village", &fund, Some("Quarter Close"))
        .expect("backup");
    assert!(info.id.contains("quarter-close"), "got {}", info.id);

    fund.name = "Clobbered".into();
    storage.save_fund("village", &fund).expect("overwrite");

    let report = storage.restore_backup(&info).expect("restore");
    assert_eq!(report.fund.name, "Village Fund");
}

#[test]
fn v1_books_migrate_additively_on_load() {
    let (storage, guard) = storage_with_temp_dir();
    let legacy = r#"{
        "id": "1f7e99f2-3b6e-4e78-9f9b-0a4f5a1c2d3e",
        "name": "Legacy",
        "schema_version": 1,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }"#;
    let path = guard.path().join("legacy.json");
    fs::write(&path, legacy).expect("write legacy book");

    let report = storage.load_from_path(&path).expect("load legacy");
    assert_eq!(report.schema_version, 1);
    assert_eq!(report.fund.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(report.migrations.len(), 1);
    assert!(report.migrations[0].contains("v1 -> v2"));
}

#[test]
fn load_surfaces_dangling_reference_warnings() {
    let (storage, _guard) = storage_with_temp_dir();
    let mut fund = sample_fund();
    fund.add_borrowing(growfund_domain::Borrowing::new("B0001", "SH404", 100.0));
    storage.save_fund("village", &fund).expect("save");

    let report = storage.load_fund("village").expect("load");
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("SH404"));
}

#[test]
fn dir_mirror_pushes_and_pulls_documents() {
    let temp = TempDir::new().expect("temp dir");
    let mirror = DirMirror::new(temp.path().join("remote"));
    let fund = sample_fund();

    assert!(mirror.pull("village").expect("empty pull").is_none());
    mirror.push("village", &fund).expect("push");
    let pulled = mirror.pull("village").expect("pull").expect("document");
    assert_eq!(pulled.name, "Village Fund");
}
