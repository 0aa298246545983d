//! Business logic helpers for validated shareholder mutations.

use chrono::NaiveDate;
use growfund_domain::{FundBook, Shareholder, ShareholderRole};

use crate::error::{CoreError, CoreResult};

/// Provides validated mutations for [`Shareholder`] entities.
pub struct ShareholderService;

impl ShareholderService {
    /// Registers a new member, issuing the next sequential `SH` id.
    pub fn register(
        fund: &mut FundBook,
        name: &str,
        phone: &str,
        email: Option<&str>,
        joined_on: NaiveDate,
        role: ShareholderRole,
    ) -> CoreResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("name cannot be empty".into()));
        }
        Self::validate_name(fund, None, name)?;

        let id = fund.next_shareholder_id();
        let mut shareholder = Shareholder::new(id.clone(), name, phone.trim(), joined_on);
        shareholder.email = email.map(|value| value.trim().to_string());
        shareholder.role = role;
        fund.add_shareholder(shareholder);
        Ok(id)
    }

    /// Applies the provided field changes to an existing shareholder.
    pub fn edit(
        fund: &mut FundBook,
        id: &str,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        role: Option<ShareholderRole>,
    ) -> CoreResult<()> {
        if let Some(candidate) = name {
            let candidate = candidate.trim();
            if candidate.is_empty() {
                return Err(CoreError::Validation("name cannot be empty".into()));
            }
            Self::validate_name(fund, Some(id), candidate)?;
        }
        let shareholder = fund
            .shareholder_mut(id)
            .ok_or_else(|| CoreError::ShareholderNotFound(id.to_string()))?;
        if let Some(value) = name {
            shareholder.name = value.trim().to_string();
        }
        if let Some(value) = phone {
            shareholder.phone = value.trim().to_string();
        }
        if let Some(value) = email {
            shareholder.email = Some(value.trim().to_string());
        }
        if let Some(value) = role {
            shareholder.role = value;
        }
        shareholder.updated_at = chrono::Utc::now();
        fund.touch();
        Ok(())
    }

    /// Soft-retires a member. Rejected while the member still has an
    /// open borrowing.
    pub fn retire(fund: &mut FundBook, id: &str, exited_on: NaiveDate) -> CoreResult<()> {
        let has_open_borrowing = fund
            .borrowings
            .iter()
            .any(|b| b.shareholder_id.eq_ignore_ascii_case(id) && b.status.is_open());
        if has_open_borrowing {
            return Err(CoreError::InvalidOperation(format!(
                "shareholder {} has an open borrowing",
                id
            )));
        }
        let shareholder = fund
            .shareholder_mut(id)
            .ok_or_else(|| CoreError::ShareholderNotFound(id.to_string()))?;
        if !shareholder.is_active() {
            return Err(CoreError::InvalidOperation(format!(
                "shareholder {} is already inactive",
                id
            )));
        }
        shareholder.retire(exited_on);
        fund.touch();
        Ok(())
    }

    /// Returns a snapshot of the members currently tracked in the fund.
    pub fn list(fund: &FundBook) -> Vec<&Shareholder> {
        fund.shareholders.iter().collect()
    }

    /// Resolves an id to an active shareholder or explains why not.
    pub fn require_active<'a>(fund: &'a FundBook, id: &str) -> CoreResult<&'a Shareholder> {
        let shareholder = fund
            .shareholder(id)
            .ok_or_else(|| CoreError::ShareholderNotFound(id.to_string()))?;
        if !shareholder.is_active() {
            return Err(CoreError::Validation(format!(
                "shareholder {} is inactive",
                shareholder.id
            )));
        }
        Ok(shareholder)
    }

    fn validate_name(fund: &FundBook, exclude: Option<&str>, candidate: &str) -> CoreResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = fund.shareholders.iter().any(|s| {
            s.name.trim().to_ascii_lowercase() == normalized
                && exclude.map_or(true, |id| !s.id.eq_ignore_ascii_case(id))
        });
        if duplicate {
            Err(CoreError::Validation(format!(
                "shareholder `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use growfund_domain::{Borrowing, ShareholderStatus};

    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn register_issues_sequential_ids() {
        let mut fund = FundBook::new("Fund");
        let first = ShareholderService::register(
            &mut fund,
            "Asha",
            "9000000001",
            None,
            sample_date(),
            ShareholderRole::Member,
        )
        .expect("first registration");
        let second = ShareholderService::register(
            &mut fund,
            "Binu",
            "9000000002",
            None,
            sample_date(),
            ShareholderRole::Treasurer,
        )
        .expect("second registration");
        assert_eq!(first, "SH001");
        assert_eq!(second, "SH002");
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let mut fund = FundBook::new("Fund");
        ShareholderService::register(
            &mut fund,
            "Asha",
            "9000000001",
            None,
            sample_date(),
            ShareholderRole::Member,
        )
        .expect("first registration");
        let err = ShareholderService::register(
            &mut fund,
            "asha",
            "9000000003",
            None,
            sample_date(),
            ShareholderRole::Member,
        )
        .expect_err("duplicate must fail");
        assert!(matches!(err, CoreError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn retire_blocks_open_borrowings() {
        let mut fund = FundBook::new("Fund");
        let id = ShareholderService::register(
            &mut fund,
            "Asha",
            "9000000001",
            None,
            sample_date(),
            ShareholderRole::Member,
        )
        .expect("registration");
        fund.add_borrowing(Borrowing::new("B0001", id.clone(), 500.0));

        let err = ShareholderService::retire(&mut fund, &id, sample_date())
            .expect_err("open borrowing must block retirement");
        assert!(matches!(err, CoreError::InvalidOperation(_)));
    }

    #[test]
    fn retire_flips_status_and_keeps_the_record() {
        let mut fund = FundBook::new("Fund");
        let id = ShareholderService::register(
            &mut fund,
            "Asha",
            "9000000001",
            None,
            sample_date(),
            ShareholderRole::Member,
        )
        .expect("registration");
        ShareholderService::retire(&mut fund, &id, sample_date()).expect("retire");

        let stored = fund.shareholder(&id).expect("record remains");
        assert_eq!(stored.status, ShareholderStatus::Inactive);
        assert_eq!(stored.exited_on, Some(sample_date()));
    }
}
