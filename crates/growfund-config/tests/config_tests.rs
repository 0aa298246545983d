use growfund_config::{Config, ConfigManager};
use tempfile::TempDir;

fn manager_in_temp_dir() -> (ConfigManager, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let manager =
        ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
    (manager, temp)
}

#[test]
fn load_returns_defaults_when_missing() {
    let (manager, _guard) = manager_in_temp_dir();
    let config = manager.load().expect("load defaults");
    assert_eq!(config.currency, "INR");
    assert!(config.ui_color_enabled);
    assert!(config.last_opened_fund.is_none());
    assert!(config.penalty_daily_rate.is_none());
}

#[test]
fn save_and_reload_roundtrip() {
    let (manager, _guard) = manager_in_temp_dir();
    let mut config = manager.load().expect("defaults");
    config.currency = "USD".into();
    config.last_opened_fund = Some("village".into());
    config.penalty_daily_rate = Some(0.02);
    manager.save(&config).expect("save");

    let reloaded = manager.load().expect("reload");
    assert_eq!(reloaded.currency, "USD");
    assert_eq!(reloaded.last_opened_fund.as_deref(), Some("village"));
    assert_eq!(reloaded.penalty_daily_rate, Some(0.02));
}

#[test]
fn backups_list_newest_first_and_restore() {
    let (manager, _guard) = manager_in_temp_dir();
    let mut config = manager.load().expect("defaults");
    config.currency = "USD".into();

    let name = manager.backup(&config, Some("Before Change")).expect("backup");
    assert!(name.contains("before-change"), "got {name}");

    config.currency = "EUR".into();
    manager.save(&config).expect("save");

    let backups = manager.list_backups().expect("list");
    assert!(backups.contains(&name));

    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.currency, "USD");
}

#[test]
fn fund_root_resolution_prefers_overrides() {
    let config = Config::default();
    let base = std::path::Path::new("/data/app");
    assert_eq!(config.resolve_fund_root(base), base.join("funds"));

    let mut custom = Config::default();
    custom.default_fund_root = Some("/elsewhere/books".into());
    assert_eq!(
        custom.resolve_fund_root(base),
        std::path::PathBuf::from("/elsewhere/books")
    );
}
