use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stores user-configurable CLI preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_fund: Option<String>,
    /// Penalty rate charged per late day, as a fraction (0.01 = 1%).
    #[serde(default)]
    pub penalty_daily_rate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for fund books. Defaults to the
    /// `funds` directory under the application home.
    pub default_fund_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for backups.
    pub default_backup_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Directory the remote document mirror writes into. Mirroring is
    /// disabled when unset.
    pub mirror_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            last_opened_fund: None,
            penalty_daily_rate: None,
            default_fund_root: None,
            default_backup_root: None,
            mirror_root: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_fund_root(&self, base: &std::path::Path) -> PathBuf {
        match &self.default_fund_root {
            Some(path) => path.clone(),
            None => base.join("funds"),
        }
    }

    pub fn resolve_backup_root(&self, base: &std::path::Path) -> PathBuf {
        match &self.default_backup_root {
            Some(path) => path.clone(),
            None => base.join("backups"),
        }
    }
}
