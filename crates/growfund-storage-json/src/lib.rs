//! Filesystem-backed JSON persistence for fund books and their backups.

pub mod mirror;

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use growfund_core::{
    storage::{fund_warnings, FundBackupInfo, FundStorage, LoadReport},
    CoreError,
};
use growfund_domain::{FundBook, CURRENT_SCHEMA_VERSION};

pub use mirror::DirMirror;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Root directories a storage backend writes into.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub fund_root: PathBuf,
    pub backup_root: PathBuf,
}

/// JSON persistence with timestamped backups and retention pruning.
#[derive(Clone)]
pub struct JsonFundStorage {
    funds_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonFundStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.fund_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            funds_dir: paths.fund_root,
            backups_dir: paths.backup_root,
            retention: retention.max(1),
        })
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    pub fn backup_path(&self, name: &str, backup: &str) -> PathBuf {
        self.backup_dir(name).join(backup)
    }

    fn write_backup_file(
        &self,
        fund: &FundBook,
        name: &str,
        note: Option<&str>,
    ) -> Result<FundBackupInfo, CoreError> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", canonical_name(name), timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, BACKUP_EXTENSION);
        let path = dir.join(&file_name);
        write_atomic(&path, &serialize_fund(fund)?)?;
        self.prune_backups(name)?;
        Ok(FundBackupInfo {
            fund: canonical_name(name),
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{}_{}.{}", canonical_name(name), timestamp, BACKUP_EXTENSION);
        let backup_path = dir.join(&file_name);
        fs::copy(path, &backup_path)?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn prune_backups(&self, name: &str) -> Result<(), CoreError> {
        let mut entries = self.list_backups(name)?;
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl FundStorage for JsonFundStorage {
    fn save_fund(&self, name: &str, fund: &FundBook) -> Result<(), CoreError> {
        let path = self.fund_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_fund(fund)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_fund(&self, name: &str) -> Result<LoadReport, CoreError> {
        load_fund_from_path(&self.fund_path(name))
    }

    fn list_funds(&self) -> Result<Vec<String>, CoreError> {
        if !self.funds_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.funds_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_fund(&self, name: &str) -> Result<(), CoreError> {
        let path = self.fund_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn fund_path(&self, name: &str) -> PathBuf {
        self.funds_dir
            .join(format!("{}.{}", canonical_name(name), BACKUP_EXTENSION))
    }

    fn save_to_path(&self, fund: &FundBook, path: &Path) -> Result<(), CoreError> {
        if path.starts_with(&self.funds_dir) {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.backup_existing_file(stem, path)?;
            }
        }
        save_fund_to_path(fund, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadReport, CoreError> {
        load_fund_from_path(path)
    }

    fn backup_fund(
        &self,
        name: &str,
        fund: &FundBook,
        note: Option<&str>,
    ) -> Result<FundBackupInfo, CoreError> {
        self.write_backup_file(fund, name, note)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<FundBackupInfo>, CoreError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        let fund_slug = canonical_name(name);
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(FundBackupInfo {
                    fund: fund_slug.clone(),
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &FundBackupInfo) -> Result<LoadReport, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.fund_path(&backup.fund);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        load_fund_from_path(&target)
    }
}

/// Saves a fund book to an arbitrary path on disk.
pub fn save_fund_to_path(fund: &FundBook, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_fund(fund)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a fund book, applying additive schema migrations and
/// collecting referential-integrity warnings.
pub fn load_fund_from_path(path: &Path) -> Result<LoadReport, CoreError> {
    let data = fs::read_to_string(path)?;
    let mut fund: FundBook =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    let stored_version = fund.schema_version;
    let migrations = migrate_fund(&mut fund);
    let warnings = fund_warnings(&fund);
    Ok(LoadReport {
        fund,
        warnings,
        migrations,
        schema_version: stored_version,
    })
}

/// Upgrades an older fund book in place. Migrations are additive: new
/// collections default to empty and the version is stamped forward.
/// Books newer than this build are left untouched for the caller to
/// reject.
fn migrate_fund(fund: &mut FundBook) -> Vec<String> {
    let mut notes = Vec::new();
    if fund.schema_version >= CURRENT_SCHEMA_VERSION {
        return notes;
    }
    if fund.schema_version < 2 {
        // v2 introduced the penalty and action-item collections; serde
        // already defaulted them to empty on parse.
        notes.push("schema v1 -> v2: penalty and action-item collections added".to_string());
    }
    fund.schema_version = CURRENT_SCHEMA_VERSION;
    notes
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "fund".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let segments = trimmed.split('_').collect::<Vec<_>>();
    // The timestamp pair may be followed by a sanitized note segment.
    segments.windows(2).rev().find_map(|pair| {
        let (date, time) = (pair[0], pair[1]);
        if !is_digits(date, 8) || !is_digits(time, 4) {
            return None;
        }
        let raw = format!("{}{}", date, time);
        NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
            .ok()
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_fund(fund: &FundBook) -> Result<String, CoreError> {
    serde_json::to_string_pretty(fund).map_err(|err| CoreError::Serde(err.to_string()))
}
