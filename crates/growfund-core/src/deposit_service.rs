//! Business logic for recording monthly deposits and their penalties.

use chrono::NaiveDate;
use growfund_domain::{
    Deposit, DepositStatus, DueMonth, FundBook, PaymentMode, Penalty, PenaltyKind,
};

use crate::{
    calc,
    error::{CoreError, CoreResult},
    shareholder_service::ShareholderService,
};

/// Provides validated mutations for [`Deposit`] entries.
pub struct DepositService;

impl DepositService {
    /// Records a deposit against a due month, computing lateness and
    /// penalty at entry. Late deposits also levy a `LateDeposit`
    /// penalty row so the penalties report reflects them.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        fund: &mut FundBook,
        shareholder_id: &str,
        due_month: DueMonth,
        amount: f64,
        paid_on: NaiveDate,
        mode: PaymentMode,
        penalty_rate: f64,
        recorded_by: &str,
    ) -> CoreResult<String> {
        if amount <= 0.0 {
            return Err(CoreError::Validation(
                "deposit amount must be greater than zero".into(),
            ));
        }
        let shareholder_id = ShareholderService::require_active(fund, shareholder_id)?
            .id
            .clone();
        let duplicate = fund.deposits.iter().any(|d| {
            d.shareholder_id.eq_ignore_ascii_case(&shareholder_id) && d.due_month == due_month
        });
        if duplicate {
            return Err(CoreError::Validation(format!(
                "deposit for {} already recorded for {}",
                shareholder_id, due_month
            )));
        }

        let days_late = calc::deposit_days_late(&due_month, paid_on);
        let penalty_due = calc::penalty_amount(penalty_rate, amount, days_late);

        let id = fund.next_deposit_id();
        let mut deposit = Deposit::new(
            id.clone(),
            shareholder_id.clone(),
            due_month,
            amount,
            paid_on,
            mode,
            recorded_by,
        );
        deposit.days_late = days_late;
        deposit.penalty_due = penalty_due;
        deposit.status = if days_late > 0 {
            DepositStatus::Late
        } else {
            DepositStatus::OnTime
        };
        fund.add_deposit(deposit);

        if penalty_due > 0.0 {
            let penalty_id = fund.next_penalty_id();
            fund.add_penalty(Penalty::new(
                penalty_id,
                shareholder_id.clone(),
                penalty_due,
                PenaltyKind::LateDeposit,
                Self::late_penalty_reason(&id),
                recorded_by,
                paid_on,
            ));
        }

        if let Some(shareholder) = fund.shareholder_mut(&shareholder_id) {
            shareholder.share_balance += amount;
            shareholder.updated_at = chrono::Utc::now();
        }
        fund.touch();
        Ok(id)
    }

    /// Waives the penalty on a late deposit and reverses the
    /// auto-recorded penalty row.
    pub fn waive(fund: &mut FundBook, deposit_id: &str) -> CoreResult<()> {
        let reason = Self::late_penalty_reason(deposit_id);
        let deposit = fund
            .deposits
            .iter_mut()
            .find(|d| d.id.eq_ignore_ascii_case(deposit_id))
            .ok_or_else(|| CoreError::DepositNotFound(deposit_id.to_string()))?;
        if deposit.status != DepositStatus::Late {
            return Err(CoreError::InvalidOperation(format!(
                "deposit {} has no penalty to waive",
                deposit.id
            )));
        }
        deposit.waive();
        fund.penalties
            .retain(|p| !(p.kind == PenaltyKind::LateDeposit && p.reason == reason));
        fund.touch();
        Ok(())
    }

    /// Returns a snapshot of the deposits recorded in the fund.
    pub fn list(fund: &FundBook) -> Vec<&Deposit> {
        fund.deposits.iter().collect()
    }

    fn late_penalty_reason(deposit_id: &str) -> String {
        format!("Late deposit {}", deposit_id)
    }
}

#[cfg(test)]
mod tests {
    use growfund_domain::ShareholderRole;

    use super::*;
    use crate::shareholder_service::ShareholderService;

    fn fund_with_member() -> (FundBook, String) {
        let mut fund = FundBook::new("Fund");
        let id = ShareholderService::register(
            &mut fund,
            "Asha",
            "9000000001",
            None,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ShareholderRole::Member,
        )
        .expect("registration");
        (fund, id)
    }

    fn march() -> DueMonth {
        DueMonth { year: 2025, month: 3 }
    }

    #[test]
    fn on_time_deposit_credits_the_share_balance() {
        let (mut fund, member) = fund_with_member();
        let paid = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let id = DepositService::record(
            &mut fund,
            &member,
            march(),
            200.0,
            paid,
            PaymentMode::Cash,
            calc::DAILY_PENALTY_RATE,
            "SH001",
        )
        .expect("record deposit");

        let deposit = fund.deposits.iter().find(|d| d.id == id).unwrap();
        assert_eq!(deposit.status, DepositStatus::OnTime);
        assert_eq!(deposit.penalty_due, 0.0);
        assert!(fund.penalties.is_empty());
        assert_eq!(fund.shareholder(&member).unwrap().share_balance, 200.0);
    }

    #[test]
    fn late_deposit_accrues_penalty_and_levies_a_row() {
        let (mut fund, member) = fund_with_member();
        let paid = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let id = DepositService::record(
            &mut fund,
            &member,
            march(),
            200.0,
            paid,
            PaymentMode::Online,
            0.01,
            "SH001",
        )
        .expect("record deposit");

        let deposit = fund.deposits.iter().find(|d| d.id == id).unwrap();
        assert_eq!(deposit.status, DepositStatus::Late);
        assert_eq!(deposit.days_late, 5);
        assert!((deposit.penalty_due - 10.0).abs() < 1e-9);
        assert_eq!(fund.penalties.len(), 1);
        assert_eq!(fund.penalties[0].kind, PenaltyKind::LateDeposit);
    }

    #[test]
    fn rejects_zero_and_duplicate_deposits() {
        let (mut fund, member) = fund_with_member();
        let paid = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let err = DepositService::record(
            &mut fund,
            &member,
            march(),
            0.0,
            paid,
            PaymentMode::Cash,
            0.01,
            "SH001",
        )
        .expect_err("zero amount rejected");
        assert!(matches!(err, CoreError::Validation(_)));

        DepositService::record(
            &mut fund,
            &member,
            march(),
            200.0,
            paid,
            PaymentMode::Cash,
            0.01,
            "SH001",
        )
        .expect("first deposit");
        let err = DepositService::record(
            &mut fund,
            &member,
            march(),
            200.0,
            paid,
            PaymentMode::Cash,
            0.01,
            "SH001",
        )
        .expect_err("duplicate month rejected");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn waive_clears_penalty_and_reverses_the_row() {
        let (mut fund, member) = fund_with_member();
        let paid = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let id = DepositService::record(
            &mut fund,
            &member,
            march(),
            200.0,
            paid,
            PaymentMode::Cash,
            0.01,
            "SH001",
        )
        .expect("record deposit");
        assert_eq!(fund.penalties.len(), 1);

        DepositService::waive(&mut fund, &id).expect("waive");
        let deposit = fund.deposits.iter().find(|d| d.id == id).unwrap();
        assert_eq!(deposit.status, DepositStatus::Waived);
        assert_eq!(deposit.penalty_due, 0.0);
        assert!(fund.penalties.is_empty());
    }
}
