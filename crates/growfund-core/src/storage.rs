use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use growfund_domain::FundBook;

use crate::CoreError;

/// Describes a persisted backup artifact for a fund book.
#[derive(Debug, Clone)]
pub struct FundBackupInfo {
    pub fund: String,
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Metadata describing the outcome of a load operation.
#[derive(Debug)]
pub struct LoadReport {
    pub fund: FundBook,
    pub warnings: Vec<String>,
    pub migrations: Vec<String>,
    pub schema_version: u8,
}

/// Abstraction over persistence backends capable of storing fund books
/// and their backups.
pub trait FundStorage: Send + Sync {
    fn save_fund(&self, name: &str, fund: &FundBook) -> Result<(), CoreError>;
    fn load_fund(&self, name: &str) -> Result<LoadReport, CoreError>;
    fn list_funds(&self) -> Result<Vec<String>, CoreError>;
    fn delete_fund(&self, name: &str) -> Result<(), CoreError>;
    fn fund_path(&self, name: &str) -> PathBuf;
    fn save_to_path(&self, fund: &FundBook, path: &Path) -> Result<(), CoreError>;
    fn load_from_path(&self, path: &Path) -> Result<LoadReport, CoreError>;
    fn backup_fund(
        &self,
        name: &str,
        fund: &FundBook,
        note: Option<&str>,
    ) -> Result<FundBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<FundBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &FundBackupInfo) -> Result<LoadReport, CoreError>;
}

/// Remote document store the local commits are mirrored to. Pushes are
/// best-effort by contract: callers log failures and move on, there is
/// no transactional linkage with the local store.
pub trait RemoteMirror: Send + Sync {
    /// Short human-readable name used in log messages.
    fn label(&self) -> &str;
    fn push(&self, name: &str, fund: &FundBook) -> Result<(), CoreError>;
    fn pull(&self, name: &str) -> Result<Option<FundBook>, CoreError>;
}

/// Detects dangling references and other anomalies within a fund
/// snapshot. Surfaced as warnings when a fund is loaded.
pub fn fund_warnings(fund: &FundBook) -> Vec<String> {
    let shareholder_ids: HashSet<_> = fund
        .shareholders
        .iter()
        .map(|s| s.id.to_ascii_uppercase())
        .collect();
    let borrowing_ids: HashSet<_> = fund
        .borrowings
        .iter()
        .map(|b| b.id.to_ascii_uppercase())
        .collect();
    let mut warnings = Vec::new();

    for deposit in &fund.deposits {
        if !shareholder_ids.contains(&deposit.shareholder_id.to_ascii_uppercase()) {
            warnings.push(format!(
                "deposit {} references unknown shareholder {}",
                deposit.id, deposit.shareholder_id
            ));
        }
    }
    for borrowing in &fund.borrowings {
        if !shareholder_ids.contains(&borrowing.shareholder_id.to_ascii_uppercase()) {
            warnings.push(format!(
                "borrowing {} references unknown shareholder {}",
                borrowing.id, borrowing.shareholder_id
            ));
        }
        if borrowing.approved_amount.is_some()
            && matches!(
                borrowing.status,
                growfund_domain::BorrowingStatus::Pending
            )
        {
            warnings.push(format!(
                "borrowing {} carries an approved amount while still pending",
                borrowing.id
            ));
        }
    }
    for repayment in &fund.repayments {
        if !borrowing_ids.contains(&repayment.borrowing_id.to_ascii_uppercase()) {
            warnings.push(format!(
                "repayment {} references unknown borrowing {}",
                repayment.entry_id, repayment.borrowing_id
            ));
        }
    }
    for penalty in &fund.penalties {
        if !shareholder_ids.contains(&penalty.shareholder_id.to_ascii_uppercase()) {
            warnings.push(format!(
                "penalty {} references unknown shareholder {}",
                penalty.id, penalty.shareholder_id
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use growfund_domain::{Borrowing, FundBook, PaymentMode, Repayment};

    use super::fund_warnings;

    #[test]
    fn flags_dangling_references() {
        let mut fund = FundBook::new("Audit");
        fund.add_borrowing(Borrowing::new("B0001", "SH999", 100.0));
        fund.add_repayment(Repayment::new(
            "B0404",
            "SH999",
            10.0,
            0.0,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            PaymentMode::Cash,
        ));

        let warnings = fund_warnings(&fund);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("unknown shareholder SH999"));
        assert!(warnings[1].contains("unknown borrowing B0404"));
    }
}
