//! Directory-backed stand-in for the remote document store.
//!
//! Each fund mirrors to a single JSON document under the target
//! directory. Pushes are best-effort by contract: the repository layer
//! logs failures and keeps the local commit.

use std::{fs, path::PathBuf};

use growfund_core::{storage::RemoteMirror, CoreError};
use growfund_domain::FundBook;

pub struct DirMirror {
    dir: PathBuf,
    label: String,
}

impl DirMirror {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            label: "directory mirror".into(),
        }
    }

    pub fn with_label(dir: PathBuf, label: impl Into<String>) -> Self {
        Self {
            dir,
            label: label.into(),
        }
    }

    fn document_path(&self, name: &str) -> PathBuf {
        let slug: String = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'a'..='z' | '0'..='9' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{}.json", slug))
    }
}

impl RemoteMirror for DirMirror {
    fn label(&self) -> &str {
        &self.label
    }

    fn push(&self, name: &str, fund: &FundBook) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| CoreError::Mirror(format!("{}: {}", self.label, err)))?;
        let json = serde_json::to_string_pretty(fund)
            .map_err(|err| CoreError::Mirror(format!("{}: {}", self.label, err)))?;
        fs::write(self.document_path(name), json)
            .map_err(|err| CoreError::Mirror(format!("{}: {}", self.label, err)))?;
        Ok(())
    }

    fn pull(&self, name: &str) -> Result<Option<FundBook>, CoreError> {
        let path = self.document_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .map_err(|err| CoreError::Mirror(format!("{}: {}", self.label, err)))?;
        let fund = serde_json::from_str(&data)
            .map_err(|err| CoreError::Mirror(format!("{}: {}", self.label, err)))?;
        Ok(Some(fund))
    }
}
