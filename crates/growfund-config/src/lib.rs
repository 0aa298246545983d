//! growfund-config
//!
//! User-configurable CLI preferences and their persistence manager.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{ConfigManager, CONFIG_BACKUP_SCHEMA_VERSION};
pub use model::Config;
