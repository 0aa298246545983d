use std::sync::Mutex;

use fund_core::{config::ConfigManager, core::FundManager};
use growfund_storage_json::{JsonFundStorage, StoragePaths};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of
/// the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (FundManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let paths = StoragePaths {
        fund_root: base.join("funds"),
        backup_root: base.join("backups"),
    };
    let storage = JsonFundStorage::with_retention(paths, 3).expect("create json storage backend");
    let fund_manager = FundManager::new(Box::new(storage));
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (fund_manager, config_manager)
}
