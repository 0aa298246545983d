//! Business logic for fund investments.

use chrono::NaiveDate;
use growfund_domain::{FundBook, Investment, InvestmentStatus};

use crate::error::{CoreError, CoreResult};

/// Provides validated mutations for [`Investment`] entities.
pub struct InvestmentService;

impl InvestmentService {
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        fund: &mut FundBook,
        title: &str,
        amount: f64,
        invested_on: NaiveDate,
        expected_return_on: NaiveDate,
        expected_return_percent: f64,
        recorded_by: &str,
        notes: Option<&str>,
    ) -> CoreResult<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("title cannot be empty".into()));
        }
        if amount <= 0.0 {
            return Err(CoreError::Validation(
                "investment amount must be greater than zero".into(),
            ));
        }
        if expected_return_on <= invested_on {
            return Err(CoreError::Validation(
                "expected return date must come after the investment date".into(),
            ));
        }

        let id = fund.next_investment_id();
        let mut investment = Investment::new(
            id.clone(),
            title,
            amount,
            invested_on,
            expected_return_on,
            expected_return_percent,
            recorded_by,
        );
        investment.notes = notes.map(|value| value.trim().to_string());
        fund.add_investment(investment);
        Ok(id)
    }

    /// Records the realized return and closes the investment. The
    /// variance against expectation is computed at entry time.
    pub fn close(
        fund: &mut FundBook,
        id: &str,
        returned_on: NaiveDate,
        amount_returned: f64,
    ) -> CoreResult<()> {
        if amount_returned < 0.0 {
            return Err(CoreError::Validation(
                "returned amount cannot be negative".into(),
            ));
        }
        let investment = fund
            .investment_mut(id)
            .ok_or_else(|| CoreError::InvestmentNotFound(id.to_string()))?;
        if investment.status != InvestmentStatus::Open {
            return Err(CoreError::InvalidOperation(format!(
                "investment {} is already closed",
                investment.id
            )));
        }
        if returned_on < investment.invested_on {
            return Err(CoreError::Validation(
                "return date cannot precede the investment date".into(),
            ));
        }
        investment.close(returned_on, amount_returned);
        fund.touch();
        Ok(())
    }

    pub fn list(fund: &FundBook) -> Vec<&Investment> {
        fund.investments.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_rejects_double_entry() {
        let mut fund = FundBook::new("Fund");
        let invested = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let id = InvestmentService::record(
            &mut fund,
            "Dairy co-op",
            2000.0,
            invested,
            expected,
            8.0,
            "SH002",
            None,
        )
        .expect("record");

        let returned = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        InvestmentService::close(&mut fund, &id, returned, 2200.0).expect("close");
        let err = InvestmentService::close(&mut fund, &id, returned, 2200.0)
            .expect_err("second close rejected");
        assert!(matches!(err, CoreError::InvalidOperation(_)));
    }

    #[test]
    fn record_validates_dates() {
        let mut fund = FundBook::new("Fund");
        let invested = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = InvestmentService::record(
            &mut fund,
            "Backwards",
            100.0,
            invested,
            invested,
            5.0,
            "SH002",
            None,
        )
        .expect_err("same-day return rejected");
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
