//! Repository facade coordinating fund state, persistence, backups,
//! and the remote mirror.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use growfund_core::{
    storage::{FundBackupInfo, FundStorage, LoadReport, RemoteMirror},
    CoreError, Outcome,
};
use growfund_domain::{FundBook, CURRENT_SCHEMA_VERSION};

use super::watch::{ChangeFeed, ChangeNotice, ChangeScope};

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub warnings: Vec<String>,
    pub migrations: Vec<String>,
    pub schema_version: u8,
}

/// Facade that mediates between in-memory state, the local store, and
/// the remote document mirror. Local commits succeed even when the
/// mirror is unreachable; those failures are logged and ignored.
pub struct FundManager {
    current: Option<FundBook>,
    current_name: Option<String>,
    current_path: Option<PathBuf>,
    storage: Box<dyn FundStorage>,
    mirror: Option<Box<dyn RemoteMirror>>,
    feed: ChangeFeed,
}

impl FundManager {
    pub fn new(storage: Box<dyn FundStorage>) -> Self {
        Self {
            current: None,
            current_name: None,
            current_path: None,
            storage,
            mirror: None,
            feed: ChangeFeed::new(),
        }
    }

    pub fn with_mirror(storage: Box<dyn FundStorage>, mirror: Box<dyn RemoteMirror>) -> Self {
        let mut manager = Self::new(storage);
        manager.mirror = Some(mirror);
        manager
    }

    pub fn storage(&self) -> &dyn FundStorage {
        self.storage.as_ref()
    }

    // -- state access ------------------------------------------------------

    pub fn current(&self) -> Option<&FundBook> {
        self.current.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn with_current<T>(
        &self,
        f: impl FnOnce(&FundBook) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        match &self.current {
            Some(fund) => f(fund),
            None => Err(CoreError::FundNotLoaded),
        }
    }

    /// Runs a mutation against the loaded fund, returning the
    /// tri-state outcome threaded to the presentation layer. Committed
    /// mutations publish a change notice; failures are surfaced on the
    /// stream without advancing the revision.
    pub fn execute<T>(
        &mut self,
        scope: ChangeScope,
        f: impl FnOnce(&mut FundBook) -> Result<T, CoreError>,
    ) -> Outcome<T> {
        let result = match &mut self.current {
            Some(fund) => f(fund),
            None => Err(CoreError::FundNotLoaded),
        };
        match result {
            Ok(value) => {
                self.feed.publish(scope);
                Outcome::Success(value)
            }
            Err(err) => {
                let message = err.to_string();
                self.feed.publish_error(&message);
                Outcome::Error(message)
            }
        }
    }

    /// Registers a reactive reader of repository state.
    pub fn subscribe(&mut self) -> Receiver<Outcome<ChangeNotice>> {
        self.feed.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.feed.revision()
    }

    pub fn set_current(&mut self, fund: FundBook, path: Option<PathBuf>, name: Option<String>) {
        self.current = Some(fund);
        self.current_path = path;
        self.current_name = name;
        self.feed.publish(ChangeScope::Fund);
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
        self.current_path = None;
        self.feed.publish(ChangeScope::Fund);
    }

    // -- persistence -------------------------------------------------------

    pub fn load(&mut self, name: &str) -> Result<LoadMetadata, CoreError> {
        let report = self.storage.load_fund(name)?;
        self.ensure_schema_support(report.schema_version)?;
        let path = self.storage.fund_path(name);
        Ok(self.apply_load(report, path, Some(name.to_string())))
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<LoadMetadata, CoreError> {
        let report = self.storage.load_from_path(path)?;
        self.ensure_schema_support(report.schema_version)?;
        Ok(self.apply_load(report, path.to_path_buf(), None))
    }

    pub fn save(&mut self) -> Result<PathBuf, CoreError> {
        if let Some(name) = self.current_name.clone() {
            self.save_as(&name)
        } else if let Some(path) = self.current_path.clone() {
            self.save_to_path(&path)?;
            Ok(path)
        } else {
            Err(CoreError::Storage(
                "unable to determine save target for current fund".into(),
            ))
        }
    }

    pub fn save_as(&mut self, name: &str) -> Result<PathBuf, CoreError> {
        let fund = self.current.as_ref().ok_or(CoreError::FundNotLoaded)?;
        self.storage.save_fund(name, fund)?;
        let path = self.storage.fund_path(name);
        self.mirror_push(name, fund);
        self.current_name = Some(name.to_string());
        self.current_path = Some(path.clone());
        Ok(path)
    }

    pub fn save_to_path(&mut self, path: &Path) -> Result<(), CoreError> {
        let fund = self.current.as_ref().ok_or(CoreError::FundNotLoaded)?;
        self.storage.save_to_path(fund, path)?;
        if let Some(name) = self.current_name.clone() {
            self.mirror_push(&name, fund);
        }
        self.current_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn list_funds(&self) -> Result<Vec<String>, CoreError> {
        self.storage.list_funds()
    }

    pub fn fund_path(&self, name: &str) -> PathBuf {
        self.storage.fund_path(name)
    }

    pub fn backup(&self, note: Option<&str>) -> Result<FundBackupInfo, CoreError> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| CoreError::Storage("current fund is unnamed".into()))?;
        let fund = self.current.as_ref().ok_or(CoreError::FundNotLoaded)?;
        self.storage.backup_fund(name, fund, note)
    }

    pub fn list_backups(&self, name: &str) -> Result<Vec<FundBackupInfo>, CoreError> {
        self.storage.list_backups(name)
    }

    pub fn restore_backup(&mut self, backup: &FundBackupInfo) -> Result<LoadMetadata, CoreError> {
        let report = self.storage.restore_backup(backup)?;
        self.ensure_schema_support(report.schema_version)?;
        let path = self.storage.fund_path(&backup.fund);
        Ok(self.apply_load(report, path, Some(backup.fund.clone())))
    }

    fn mirror_push(&self, name: &str, fund: &FundBook) {
        let Some(mirror) = &self.mirror else {
            return;
        };
        // Fire-and-forget: the local commit already succeeded and there
        // is no retry policy for the remote side.
        if let Err(err) = mirror.push(name, fund) {
            tracing::warn!(
                mirror = mirror.label(),
                fund = name,
                error = %err,
                "remote mirror push failed; local commit kept"
            );
        } else {
            tracing::debug!(mirror = mirror.label(), fund = name, "mirrored fund");
        }
    }

    fn ensure_schema_support(&self, schema_version: u8) -> Result<(), CoreError> {
        if schema_version > CURRENT_SCHEMA_VERSION {
            return Err(CoreError::Storage(format!(
                "fund schema v{} is newer than supported v{}",
                schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }

    fn apply_load(
        &mut self,
        report: LoadReport,
        path: PathBuf,
        name: Option<String>,
    ) -> LoadMetadata {
        let LoadReport {
            fund,
            warnings,
            migrations,
            schema_version,
        } = report;
        self.current = Some(fund);
        self.current_path = Some(path);
        self.current_name = name;
        self.feed.publish(ChangeScope::Fund);
        LoadMetadata {
            warnings,
            migrations,
            schema_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use growfund_storage_json::{JsonFundStorage, StoragePaths};
    use tempfile::tempdir;

    use super::*;

    fn storage_in(dir: &Path) -> JsonFundStorage {
        JsonFundStorage::with_retention(
            StoragePaths {
                fund_root: dir.join("funds"),
                backup_root: dir.join("backups"),
            },
            3,
        )
        .expect("create storage")
    }

    struct FailingMirror;

    impl RemoteMirror for FailingMirror {
        fn label(&self) -> &str {
            "failing mirror"
        }

        fn push(&self, _name: &str, _fund: &FundBook) -> Result<(), CoreError> {
            Err(CoreError::Mirror("remote unreachable".into()))
        }

        fn pull(&self, _name: &str) -> Result<Option<FundBook>, CoreError> {
            Err(CoreError::Mirror("remote unreachable".into()))
        }
    }

    #[test]
    fn save_and_load_named_roundtrip() {
        let temp = tempdir().unwrap();
        let mut manager = FundManager::new(Box::new(storage_in(temp.path())));

        manager.set_current(FundBook::new("Demo"), None, None);
        let path = manager.save_as("demo-fund").expect("save fund");
        assert!(path.exists());

        manager.clear();
        let metadata = manager.load("demo-fund").expect("load fund");
        assert_eq!(metadata.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(manager.current().is_some());
        assert_eq!(manager.current_name(), Some("demo-fund"));
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let mut manager = FundManager::new(Box::new(storage_in(temp.path())));

        let path = temp.path().join("future.json");
        let mut fund = FundBook::new("Future");
        fund.schema_version = CURRENT_SCHEMA_VERSION + 5;
        fs::write(&path, serde_json_string(&fund)).unwrap();

        let err = manager
            .load_from_path(&path)
            .expect_err("future schema must fail");
        match err {
            CoreError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn mirror_failure_does_not_fail_the_local_commit() {
        let temp = tempdir().unwrap();
        let mut manager = FundManager::with_mirror(
            Box::new(storage_in(temp.path())),
            Box::new(FailingMirror),
        );
        manager.set_current(FundBook::new("Demo"), None, None);

        let path = manager.save_as("demo-fund").expect("local commit succeeds");
        assert!(path.exists());
    }

    #[test]
    fn execute_publishes_success_and_error_outcomes() {
        let temp = tempdir().unwrap();
        let mut manager = FundManager::new(Box::new(storage_in(temp.path())));
        manager.set_current(FundBook::new("Demo"), None, None);
        let rx = manager.subscribe();

        let outcome = manager.execute(ChangeScope::Shareholders, |fund| {
            fund.touch();
            Ok(fund.name.clone())
        });
        assert_eq!(outcome, Outcome::Success("Demo".to_string()));

        let failed: Outcome<()> = manager.execute(ChangeScope::Shareholders, |_| {
            Err(CoreError::Validation("nope".into()))
        });
        assert!(failed.is_error());

        let received: Vec<_> = rx.try_iter().collect();
        assert!(received.iter().any(|o| o.is_loading()));
        assert!(received
            .iter()
            .any(|o| matches!(o, Outcome::Success(notice) if notice.scope == ChangeScope::Shareholders)));
        assert!(received.iter().any(|o| o.is_error()));
    }

    #[test]
    fn execute_without_a_fund_reports_not_loaded() {
        let temp = tempdir().unwrap();
        let mut manager = FundManager::new(Box::new(storage_in(temp.path())));
        let outcome: Outcome<()> = manager.execute(ChangeScope::Fund, |_| Ok(()));
        assert_eq!(
            outcome.error_message(),
            Some(CoreError::FundNotLoaded.to_string().as_str())
        );
    }

    fn serde_json_string(fund: &FundBook) -> String {
        // Round-trip through the storage crate's writer to avoid a
        // direct serde_json dev-dependency here.
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fund.json");
        growfund_storage_json::save_fund_to_path(fund, &path).unwrap();
        fs::read_to_string(&path).unwrap()
    }
}
