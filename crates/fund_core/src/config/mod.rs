use std::path::PathBuf;

pub use growfund_config::{Config, ConfigError, ConfigManager, CONFIG_BACKUP_SCHEMA_VERSION};

use crate::core::utils::app_data_dir;

/// Configuration manager rooted at the application data directory.
pub fn default_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(app_data_dir())
}

pub fn manager_with_base(base: PathBuf) -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}
