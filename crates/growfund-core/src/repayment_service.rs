//! Business logic for repayments: entry, penalty calculation, and the
//! two-stage approval progression.

use chrono::NaiveDate;
use growfund_domain::{
    ActionItem, ActionKind, BorrowingStatus, FundBook, PaymentMode, PaymentStatus, Repayment,
    ShareholderRole,
};
use uuid::Uuid;

use crate::{
    borrowing_service::BorrowingService,
    calc,
    error::{CoreError, CoreResult},
};

/// Provides validated mutations for [`Repayment`] entries.
///
/// Entries carry a provisional uuid until an admin finalizes them; the
/// final sequential id is assigned at that point. Conflicting edits are
/// not reconciled, last write wins.
pub struct RepaymentService;

impl RepaymentService {
    /// Records a repayment against an active borrowing. Days late are
    /// measured against the borrowing's due date; the penalty due is
    /// `rate × outstanding × days`, computed at entry.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        fund: &mut FundBook,
        borrowing_id: &str,
        principal: f64,
        penalty_paid: f64,
        paid_on: NaiveDate,
        mode: PaymentMode,
        penalty_rate: f64,
    ) -> CoreResult<Uuid> {
        if principal <= 0.0 {
            return Err(CoreError::Validation(
                "principal paid must be greater than zero".into(),
            ));
        }
        if penalty_paid < 0.0 {
            return Err(CoreError::Validation("penalty paid cannot be negative".into()));
        }
        let outstanding = BorrowingService::outstanding(fund, borrowing_id)?;
        let borrowing = fund
            .borrowing(borrowing_id)
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;
        if borrowing.status != BorrowingStatus::Active {
            return Err(CoreError::InvalidOperation(format!(
                "borrowing {} is not active ({})",
                borrowing.id, borrowing.status
            )));
        }
        if principal > outstanding + calc::AMOUNT_EPSILON {
            return Err(CoreError::Validation(format!(
                "principal {:.2} exceeds the outstanding balance {:.2}",
                principal, outstanding
            )));
        }

        let days_late = borrowing
            .due_on
            .map(|due| calc::days_late(due, paid_on))
            .unwrap_or(0);
        let penalty_due = calc::penalty_amount(penalty_rate, outstanding, days_late);
        let principal_base = borrowing.principal();
        let prior_repaid = principal_base - outstanding;
        let shareholder_id = borrowing.shareholder_id.clone();
        let borrowing_id = borrowing.id.clone();

        let mut entry = Repayment::new(
            borrowing_id.clone(),
            shareholder_id,
            principal,
            penalty_paid,
            paid_on,
            mode,
        );
        entry.days_late = days_late;
        entry.penalty_due = penalty_due;
        entry.outstanding_after = calc::outstanding_after(principal_base, prior_repaid, principal);
        let entry_id = fund.add_repayment(entry);
        fund.add_action_item(ActionItem::new(
            ActionKind::RepaymentApproval,
            entry_id.to_string(),
            format!("Repayment of {:.2} on {}", principal, borrowing_id),
            ShareholderRole::Treasurer,
        ));
        Ok(entry_id)
    }

    /// First approval stage. The treasurer endorses the entry and the
    /// admin inherits an action item.
    pub fn endorse(
        fund: &mut FundBook,
        entry_id: Uuid,
        actor_id: &str,
        notes: Option<String>,
    ) -> CoreResult<()> {
        Self::check_actor(fund, actor_id, ShareholderRole::can_endorse, "endorse")?;
        let entry = fund
            .repayment_mut(entry_id)
            .ok_or(CoreError::RepaymentNotFound(entry_id))?;
        if !entry.status.can_advance_to(PaymentStatus::TreasurerApproved) {
            return Err(CoreError::InvalidOperation(format!(
                "repayment {} cannot advance from {}",
                entry_id, entry.status
            )));
        }
        entry.advance(PaymentStatus::TreasurerApproved, actor_id, notes);
        let borrowing_id = entry.borrowing_id.clone();
        fund.resolve_action_items(&entry_id.to_string());
        fund.add_action_item(ActionItem::new(
            ActionKind::RepaymentApproval,
            entry_id.to_string(),
            format!("Endorsed repayment on {} awaits final approval", borrowing_id),
            ShareholderRole::Admin,
        ));
        fund.touch();
        Ok(())
    }

    /// Second approval stage. Assigns the final sequential id, settles
    /// the borrowing balance, and closes the borrowing at zero.
    pub fn finalize(
        fund: &mut FundBook,
        entry_id: Uuid,
        actor_id: &str,
        notes: Option<String>,
    ) -> CoreResult<String> {
        Self::check_actor(fund, actor_id, ShareholderRole::can_finalize, "finalize")?;
        let final_id = fund.next_repayment_id();
        let entry = fund
            .repayment_mut(entry_id)
            .ok_or(CoreError::RepaymentNotFound(entry_id))?;
        if !entry.status.can_advance_to(PaymentStatus::AdminApproved) {
            return Err(CoreError::InvalidOperation(format!(
                "repayment {} cannot advance from {}",
                entry_id, entry.status
            )));
        }
        entry.id = Some(final_id.clone());
        entry.advance(PaymentStatus::AdminApproved, actor_id, notes);
        let borrowing_id = entry.borrowing_id.clone();

        let outstanding = BorrowingService::outstanding(fund, &borrowing_id)?;
        if outstanding.abs() <= calc::AMOUNT_EPSILON {
            if let Some(borrowing) = fund.borrowing_mut(&borrowing_id) {
                if borrowing.status.can_transition_to(BorrowingStatus::Completed) {
                    borrowing.status = BorrowingStatus::Completed;
                    borrowing.touch();
                }
            }
        }
        fund.resolve_action_items(&entry_id.to_string());
        fund.touch();
        Ok(final_id)
    }

    /// Rejects a pending or endorsed entry. Terminal; the balance never
    /// moved, so nothing is reversed.
    pub fn reject(
        fund: &mut FundBook,
        entry_id: Uuid,
        actor_id: &str,
        notes: Option<String>,
    ) -> CoreResult<()> {
        Self::check_actor(fund, actor_id, ShareholderRole::can_endorse, "reject")?;
        let entry = fund
            .repayment_mut(entry_id)
            .ok_or(CoreError::RepaymentNotFound(entry_id))?;
        if !entry.status.can_advance_to(PaymentStatus::Rejected) {
            return Err(CoreError::InvalidOperation(format!(
                "repayment {} cannot be rejected from {}",
                entry_id, entry.status
            )));
        }
        entry.advance(PaymentStatus::Rejected, actor_id, notes);
        fund.resolve_action_items(&entry_id.to_string());
        fund.touch();
        Ok(())
    }

    /// Entries still moving through the approval workflow.
    pub fn pending(fund: &FundBook) -> Vec<&Repayment> {
        fund.repayments
            .iter()
            .filter(|r| !r.status.is_terminal())
            .collect()
    }

    fn check_actor(
        fund: &FundBook,
        actor_id: &str,
        allowed: impl Fn(&ShareholderRole) -> bool,
        action: &str,
    ) -> CoreResult<()> {
        let actor = fund
            .shareholder(actor_id)
            .ok_or_else(|| CoreError::ShareholderNotFound(actor_id.to_string()))?;
        if !allowed(&actor.role) {
            return Err(CoreError::InvalidOperation(format!(
                "{} ({}) may not {} repayments",
                actor.id, actor.role, action
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use growfund_domain::ShareholderRole;

    use super::*;
    use crate::{borrowing_service::BorrowingService, shareholder_service::ShareholderService};

    struct Actors {
        member: String,
        treasurer: String,
        admin: String,
    }

    fn fund_with_active_borrowing() -> (FundBook, String, Actors) {
        let mut fund = FundBook::new("Fund");
        let joined = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let member = ShareholderService::register(
            &mut fund,
            "Asha",
            "9000000001",
            None,
            joined,
            ShareholderRole::Member,
        )
        .unwrap();
        let treasurer = ShareholderService::register(
            &mut fund,
            "Binu",
            "9000000002",
            None,
            joined,
            ShareholderRole::Treasurer,
        )
        .unwrap();
        let admin = ShareholderService::register(
            &mut fund,
            "Devika",
            "9000000003",
            None,
            joined,
            ShareholderRole::Admin,
        )
        .unwrap();

        let borrowing = BorrowingService::request(&mut fund, &member, 1000.0, None).unwrap();
        BorrowingService::consent(&mut fund, &borrowing, &treasurer).unwrap();
        BorrowingService::approve(&mut fund, &borrowing, &admin, None, None).unwrap();
        BorrowingService::disburse(
            &mut fund,
            &borrowing,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        )
        .unwrap();

        (
            fund,
            borrowing,
            Actors {
                member,
                treasurer,
                admin,
            },
        )
    }

    fn record(fund: &mut FundBook, borrowing: &str, principal: f64, day: NaiveDate) -> Uuid {
        RepaymentService::record(
            fund,
            borrowing,
            principal,
            0.0,
            day,
            PaymentMode::Cash,
            calc::DAILY_PENALTY_RATE,
        )
        .expect("record repayment")
    }

    #[test]
    fn rejects_zero_and_overpaying_entries() {
        let (mut fund, borrowing, _) = fund_with_active_borrowing();
        let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

        let err = RepaymentService::record(
            &mut fund,
            &borrowing,
            0.0,
            0.0,
            day,
            PaymentMode::Cash,
            0.01,
        )
        .expect_err("zero principal rejected");
        assert!(matches!(err, CoreError::Validation(_)));

        let err = RepaymentService::record(
            &mut fund,
            &borrowing,
            1500.0,
            0.0,
            day,
            PaymentMode::Cash,
            0.01,
        )
        .expect_err("overpayment rejected");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn on_time_entry_has_no_penalty() {
        let (mut fund, borrowing, _) = fund_with_active_borrowing();
        let entry_id = record(
            &mut fund,
            &borrowing,
            400.0,
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
        );
        let entry = fund.repayment(entry_id).unwrap();
        assert_eq!(entry.days_late, 0);
        assert_eq!(entry.penalty_due, 0.0);
        assert!((entry.outstanding_after - 600.0).abs() < 1e-9);
    }

    #[test]
    fn late_entry_accrues_penalty_on_the_outstanding_base() {
        let (mut fund, borrowing, _) = fund_with_active_borrowing();
        // Due 2025-04-01, paid five days later on the full balance.
        let entry_id = record(
            &mut fund,
            &borrowing,
            1000.0,
            NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
        );
        let entry = fund.repayment(entry_id).unwrap();
        assert_eq!(entry.days_late, 5);
        assert!((entry.penalty_due - 50.0).abs() < 1e-9);
    }

    #[test]
    fn full_workflow_assigns_final_id_and_completes_the_borrowing() {
        let (mut fund, borrowing, actors) = fund_with_active_borrowing();
        let entry_id = record(
            &mut fund,
            &borrowing,
            1000.0,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );

        RepaymentService::endorse(&mut fund, entry_id, &actors.treasurer, None).expect("endorse");
        let final_id = RepaymentService::finalize(
            &mut fund,
            entry_id,
            &actors.admin,
            Some("closing".into()),
        )
        .expect("finalize");
        assert_eq!(final_id, "R0001");

        let entry = fund.repayment(entry_id).unwrap();
        assert_eq!(entry.id.as_deref(), Some("R0001"));
        assert_eq!(entry.status, PaymentStatus::AdminApproved);
        assert_eq!(entry.approvals.len(), 2);

        let borrowing = fund.borrowing(&borrowing).unwrap();
        assert_eq!(borrowing.status, BorrowingStatus::Completed);
        assert!(fund.open_action_items().next().is_none());
    }

    #[test]
    fn pending_entries_do_not_reduce_the_outstanding_balance() {
        let (mut fund, borrowing, actors) = fund_with_active_borrowing();
        let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let entry_id = record(&mut fund, &borrowing, 400.0, day);

        // Still 1000 outstanding while the entry is provisional.
        let outstanding = BorrowingService::outstanding(&fund, &borrowing).unwrap();
        assert!((outstanding - 1000.0).abs() < 1e-9);

        RepaymentService::endorse(&mut fund, entry_id, &actors.treasurer, None).unwrap();
        RepaymentService::finalize(&mut fund, entry_id, &actors.admin, None).unwrap();
        let outstanding = BorrowingService::outstanding(&fund, &borrowing).unwrap();
        assert!((outstanding - 600.0).abs() < 1e-9);
    }

    #[test]
    fn workflow_enforces_roles_and_stage_order() {
        let (mut fund, borrowing, actors) = fund_with_active_borrowing();
        let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let entry_id = record(&mut fund, &borrowing, 400.0, day);

        let err = RepaymentService::finalize(&mut fund, entry_id, &actors.admin, None)
            .expect_err("cannot skip endorsement");
        assert!(matches!(err, CoreError::InvalidOperation(_)));

        let err = RepaymentService::endorse(&mut fund, entry_id, &actors.member, None)
            .expect_err("members cannot endorse");
        assert!(matches!(err, CoreError::InvalidOperation(_)));

        RepaymentService::endorse(&mut fund, entry_id, &actors.treasurer, None).unwrap();
        let err = RepaymentService::finalize(&mut fund, entry_id, &actors.treasurer, None)
            .expect_err("treasurers cannot finalize");
        assert!(matches!(err, CoreError::InvalidOperation(_)));
    }

    #[test]
    fn rejected_entries_are_terminal() {
        let (mut fund, borrowing, actors) = fund_with_active_borrowing();
        let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let entry_id = record(&mut fund, &borrowing, 400.0, day);

        RepaymentService::reject(&mut fund, entry_id, &actors.treasurer, Some("bad slip".into()))
            .expect("reject");
        let err = RepaymentService::endorse(&mut fund, entry_id, &actors.treasurer, None)
            .expect_err("terminal entry accepts nothing");
        assert!(matches!(err, CoreError::InvalidOperation(_)));

        let outstanding = BorrowingService::outstanding(&fund, &borrowing).unwrap();
        assert!((outstanding - 1000.0).abs() < 1e-9);
    }
}
