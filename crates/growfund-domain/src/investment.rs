//! Domain model for fund investments and their realized returns.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{normalize_label, Displayable, Identifiable, NamedEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub invested_on: NaiveDate,
    pub expected_return_on: NaiveDate,
    pub expected_return_percent: f64,
    #[serde(default)]
    pub returns: Option<InvestmentReturn>,
    pub status: InvestmentStatus,
    pub recorded_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: f64,
        invested_on: NaiveDate,
        expected_return_on: NaiveDate,
        expected_return_percent: f64,
        recorded_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            invested_on,
            expected_return_on,
            expected_return_percent,
            returns: None,
            status: InvestmentStatus::Open,
            recorded_by: recorded_by.into(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records the realized return. Variance against expectation is
    /// computed here, at entry time, not on read.
    pub fn close(&mut self, returned_on: NaiveDate, amount_returned: f64) {
        let actual_percent = if self.amount.abs() > f64::EPSILON {
            (amount_returned - self.amount) / self.amount * 100.0
        } else {
            0.0
        };
        self.returns = Some(InvestmentReturn {
            returned_on,
            amount_returned,
            actual_return_percent: actual_percent,
            variance_percent: actual_percent - self.expected_return_percent,
            days_variance: (returned_on - self.expected_return_on).num_days(),
        });
        self.status = InvestmentStatus::Closed;
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Investment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Investment {
    fn name(&self) -> &str {
        &self.title
    }
}

impl Displayable for Investment {
    fn display_label(&self) -> String {
        format!("{} {} [{}]", self.id, self.title, self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Realized return attached to a closed investment.
pub struct InvestmentReturn {
    pub returned_on: NaiveDate,
    pub amount_returned: f64,
    pub actual_return_percent: f64,
    /// Actual minus expected return percentage.
    pub variance_percent: f64,
    /// Days between the expected and actual return dates; positive
    /// when the return landed late.
    pub days_variance: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvestmentStatus {
    Open,
    Closed,
}

impl InvestmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentStatus::Open => "Open",
            InvestmentStatus::Closed => "Closed",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "open" => Some(InvestmentStatus::Open),
            "closed" => Some(InvestmentStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_computes_variance_at_entry() {
        let invested = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let mut investment =
            Investment::new("INV001", "Seed store", 1000.0, invested, expected, 12.0, "SH001");

        let returned = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        investment.close(returned, 1100.0);

        let result = investment.returns.expect("return recorded");
        assert!((result.actual_return_percent - 10.0).abs() < 1e-9);
        assert!((result.variance_percent + 2.0).abs() < 1e-9);
        assert_eq!(result.days_variance, 5);
        assert_eq!(investment.status, InvestmentStatus::Closed);
    }
}
