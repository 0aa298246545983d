//! Business logic for manually levied penalties.

use chrono::NaiveDate;
use growfund_domain::{FundBook, Penalty, PenaltyKind};

use crate::{
    error::{CoreError, CoreResult},
    shareholder_service::ShareholderService,
};

/// Provides validated mutations for [`Penalty`] rows.
pub struct PenaltyService;

impl PenaltyService {
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        fund: &mut FundBook,
        shareholder_id: &str,
        amount: f64,
        kind: PenaltyKind,
        reason: &str,
        recorded_by: &str,
        levied_on: NaiveDate,
    ) -> CoreResult<String> {
        if amount <= 0.0 {
            return Err(CoreError::Validation(
                "penalty amount must be greater than zero".into(),
            ));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(CoreError::Validation("a penalty needs a reason".into()));
        }
        let shareholder_id = ShareholderService::require_active(fund, shareholder_id)?
            .id
            .clone();

        let id = fund.next_penalty_id();
        fund.add_penalty(Penalty::new(
            id.clone(),
            shareholder_id,
            amount,
            kind,
            reason,
            recorded_by,
            levied_on,
        ));
        Ok(id)
    }

    /// Sum of penalties levied on one shareholder.
    pub fn total_for(fund: &FundBook, shareholder_id: &str) -> f64 {
        fund.penalties
            .iter()
            .filter(|p| p.shareholder_id.eq_ignore_ascii_case(shareholder_id))
            .map(|p| p.amount)
            .sum()
    }

    pub fn list(fund: &FundBook) -> Vec<&Penalty> {
        fund.penalties.iter().collect()
    }
}
