//! Business logic for borrowing requests and their approval lifecycle.

use chrono::NaiveDate;
use growfund_domain::{
    ActionItem, ActionKind, Borrowing, BorrowingStatus, FundBook, ShareholderRole,
};

use crate::{
    error::{CoreError, CoreResult},
    shareholder_service::ShareholderService,
};

/// Provides validated mutations for [`Borrowing`] entities.
pub struct BorrowingService;

impl BorrowingService {
    /// Files a borrowing request. Eligibility: an active shareholder
    /// with no other open borrowing. Opens a treasurer action item.
    pub fn request(
        fund: &mut FundBook,
        shareholder_id: &str,
        amount: f64,
        notes: Option<&str>,
    ) -> CoreResult<String> {
        if amount <= 0.0 {
            return Err(CoreError::Validation(
                "requested amount must be greater than zero".into(),
            ));
        }
        let shareholder_id = ShareholderService::require_active(fund, shareholder_id)?
            .id
            .clone();
        let has_open = fund
            .borrowings
            .iter()
            .any(|b| b.shareholder_id.eq_ignore_ascii_case(&shareholder_id) && b.status.is_open());
        if has_open {
            return Err(CoreError::Validation(format!(
                "shareholder {} already has an open borrowing",
                shareholder_id
            )));
        }

        let id = fund.next_borrowing_id();
        let mut borrowing = Borrowing::new(id.clone(), shareholder_id.clone(), amount);
        borrowing.notes = notes.map(|value| value.trim().to_string());
        fund.add_borrowing(borrowing);
        fund.add_action_item(ActionItem::new(
            ActionKind::BorrowingRequest,
            id.clone(),
            format!("{} requests {:.2}", shareholder_id, amount),
            ShareholderRole::Treasurer,
        ));
        Ok(id)
    }

    /// Records a co-approver's consent on a pending request.
    pub fn consent(fund: &mut FundBook, borrowing_id: &str, shareholder_id: &str) -> CoreResult<()> {
        let consenter = ShareholderService::require_active(fund, shareholder_id)?
            .id
            .clone();
        let borrowing = fund
            .borrowing_mut(borrowing_id)
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;
        if borrowing.status != BorrowingStatus::Pending {
            return Err(CoreError::InvalidOperation(format!(
                "borrowing {} is not pending",
                borrowing.id
            )));
        }
        if borrowing.shareholder_id.eq_ignore_ascii_case(&consenter) {
            return Err(CoreError::Validation(
                "the requester cannot consent to their own borrowing".into(),
            ));
        }
        if borrowing.has_consent_from(&consenter) {
            return Err(CoreError::Validation(format!(
                "{} already consented to {}",
                consenter, borrowing.id
            )));
        }
        borrowing.consenting_ids.push(consenter);
        borrowing.touch();
        fund.touch();
        Ok(())
    }

    /// Approves a pending borrowing. This is the only place the
    /// approved amount is ever set.
    pub fn approve(
        fund: &mut FundBook,
        borrowing_id: &str,
        approver_id: &str,
        amount: Option<f64>,
        notes: Option<&str>,
    ) -> CoreResult<f64> {
        let approver = fund
            .shareholder(approver_id)
            .ok_or_else(|| CoreError::ShareholderNotFound(approver_id.to_string()))?;
        if !approver.role.can_endorse() {
            return Err(CoreError::InvalidOperation(format!(
                "{} ({}) may not approve borrowings",
                approver.id, approver.role
            )));
        }
        let borrowing = fund
            .borrowing_mut(borrowing_id)
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;
        if !borrowing.status.can_transition_to(BorrowingStatus::Approved) {
            return Err(CoreError::InvalidOperation(format!(
                "borrowing {} cannot move from {} to Approved",
                borrowing.id, borrowing.status
            )));
        }
        if borrowing.consenting_ids.is_empty() {
            return Err(CoreError::Validation(format!(
                "borrowing {} has no co-approver consent yet",
                borrowing.id
            )));
        }
        let approved = amount.unwrap_or(borrowing.requested_amount);
        if approved <= 0.0 || approved > borrowing.requested_amount {
            return Err(CoreError::Validation(format!(
                "approved amount must be within (0, {:.2}]",
                borrowing.requested_amount
            )));
        }
        borrowing.approved_amount = Some(approved);
        borrowing.status = BorrowingStatus::Approved;
        if let Some(value) = notes {
            borrowing.notes = Some(value.trim().to_string());
        }
        borrowing.touch();
        let subject = borrowing.id.clone();
        fund.resolve_action_items(&subject);
        fund.touch();
        Ok(approved)
    }

    /// Rejects a pending borrowing. Terminal.
    pub fn reject(fund: &mut FundBook, borrowing_id: &str, actor_id: &str) -> CoreResult<()> {
        let actor = fund
            .shareholder(actor_id)
            .ok_or_else(|| CoreError::ShareholderNotFound(actor_id.to_string()))?;
        if !actor.role.can_endorse() {
            return Err(CoreError::InvalidOperation(format!(
                "{} ({}) may not reject borrowings",
                actor.id, actor.role
            )));
        }
        let borrowing = fund
            .borrowing_mut(borrowing_id)
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;
        if !borrowing.status.can_transition_to(BorrowingStatus::Rejected) {
            return Err(CoreError::InvalidOperation(format!(
                "borrowing {} cannot move from {} to Rejected",
                borrowing.id, borrowing.status
            )));
        }
        borrowing.status = BorrowingStatus::Rejected;
        borrowing.touch();
        let subject = borrowing.id.clone();
        fund.resolve_action_items(&subject);
        fund.touch();
        Ok(())
    }

    /// Hands the approved amount over, starting the repayment clock.
    pub fn disburse(
        fund: &mut FundBook,
        borrowing_id: &str,
        started_on: NaiveDate,
        due_on: NaiveDate,
    ) -> CoreResult<()> {
        if due_on <= started_on {
            return Err(CoreError::Validation(
                "due date must come after the start date".into(),
            ));
        }
        let borrowing = fund
            .borrowing_mut(borrowing_id)
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;
        if !borrowing.status.can_transition_to(BorrowingStatus::Active) {
            return Err(CoreError::InvalidOperation(format!(
                "borrowing {} cannot move from {} to Active",
                borrowing.id, borrowing.status
            )));
        }
        borrowing.started_on = Some(started_on);
        borrowing.due_on = Some(due_on);
        borrowing.status = BorrowingStatus::Active;
        borrowing.touch();
        fund.touch();
        Ok(())
    }

    /// Balance remaining on a borrowing: the tracked principal minus
    /// the principal of every finalized repayment.
    pub fn outstanding(fund: &FundBook, borrowing_id: &str) -> CoreResult<f64> {
        let borrowing = fund
            .borrowing(borrowing_id)
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;
        let repaid: f64 = fund
            .repayments_for(&borrowing.id)
            .filter(|r| r.is_finalized())
            .map(|r| r.principal_paid)
            .sum();
        Ok(borrowing.principal() - repaid)
    }

    /// Returns a snapshot of the borrowings tracked in the fund.
    pub fn list(fund: &FundBook) -> Vec<&Borrowing> {
        fund.borrowings.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use growfund_domain::ShareholderRole;

    use super::*;
    use crate::shareholder_service::ShareholderService;

    fn seeded_fund() -> (FundBook, String, String, String) {
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
        let peer = ShareholderService::register(
            &mut fund,
            "Chandra",
            "9000000003",
            None,
            joined,
            ShareholderRole::Member,
        )
        .unwrap();
        (fund, member, treasurer, peer)
    }

    #[test]
    fn request_opens_a_treasurer_action_item() {
        let (mut fund, member, _, _) = seeded_fund();
        let id = BorrowingService::request(&mut fund, &member, 500.0, None).expect("request");
        assert_eq!(id, "B0001");
        let open: Vec<_> = fund.open_action_items().collect();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].subject_id, id);
        assert_eq!(open[0].for_role, ShareholderRole::Treasurer);
    }

    #[test]
    fn second_open_borrowing_is_rejected() {
        let (mut fund, member, _, _) = seeded_fund();
        BorrowingService::request(&mut fund, &member, 500.0, None).expect("first");
        let err = BorrowingService::request(&mut fund, &member, 100.0, None)
            .expect_err("second open borrowing must fail");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn approval_requires_consent_and_sets_the_amount_once() {
        let (mut fund, member, treasurer, peer) = seeded_fund();
        let id = BorrowingService::request(&mut fund, &member, 500.0, None).expect("request");

        let err = BorrowingService::approve(&mut fund, &id, &treasurer, None, None)
            .expect_err("no consent yet");
        assert!(matches!(err, CoreError::Validation(_)));

        BorrowingService::consent(&mut fund, &id, &peer).expect("consent");
        let approved = BorrowingService::approve(&mut fund, &id, &treasurer, Some(400.0), None)
            .expect("approve");
        assert_eq!(approved, 400.0);

        let borrowing = fund.borrowing(&id).unwrap();
        assert_eq!(borrowing.status, BorrowingStatus::Approved);
        assert_eq!(borrowing.approved_amount, Some(400.0));
        assert!(fund.open_action_items().next().is_none());
    }

    #[test]
    fn members_cannot_approve() {
        let (mut fund, member, _, peer) = seeded_fund();
        let id = BorrowingService::request(&mut fund, &member, 500.0, None).expect("request");
        BorrowingService::consent(&mut fund, &id, &peer).expect("consent");
        let err = BorrowingService::approve(&mut fund, &id, &peer, None, None)
            .expect_err("member approval must fail");
        assert!(matches!(err, CoreError::InvalidOperation(_)));
    }

    #[test]
    fn requester_cannot_consent_to_themselves() {
        let (mut fund, member, _, _) = seeded_fund();
        let id = BorrowingService::request(&mut fund, &member, 500.0, None).expect("request");
        let err = BorrowingService::consent(&mut fund, &id, &member)
            .expect_err("self-consent must fail");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn disburse_requires_an_approved_borrowing() {
        let (mut fund, member, treasurer, peer) = seeded_fund();
        let id = BorrowingService::request(&mut fund, &member, 500.0, None).expect("request");
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        let err = BorrowingService::disburse(&mut fund, &id, start, due)
            .expect_err("pending borrowing cannot activate");
        assert!(matches!(err, CoreError::InvalidOperation(_)));

        BorrowingService::consent(&mut fund, &id, &peer).expect("consent");
        BorrowingService::approve(&mut fund, &id, &treasurer, None, None).expect("approve");
        BorrowingService::disburse(&mut fund, &id, start, due).expect("disburse");
        assert_eq!(fund.borrowing(&id).unwrap().status, BorrowingStatus::Active);
    }
}
