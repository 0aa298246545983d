use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".fund_core";

/// Returns the application data directory, defaulting to `~/.fund_core`.
/// Overridable via `FUND_CORE_HOME`, which the test suites rely on.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FUND_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
