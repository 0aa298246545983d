//! Domain model for monthly deposit obligations.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{normalize_label, Displayable, Identifiable, PaymentMode};
use crate::due_month::DueMonth;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub shareholder_id: String,
    pub due_month: DueMonth,
    pub amount: f64,
    pub paid_on: NaiveDate,
    pub mode: PaymentMode,
    pub days_late: i64,
    pub penalty_due: f64,
    pub status: DepositStatus,
    pub recorded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deposit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        shareholder_id: impl Into<String>,
        due_month: DueMonth,
        amount: f64,
        paid_on: NaiveDate,
        mode: PaymentMode,
        recorded_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            shareholder_id: shareholder_id.into(),
            due_month,
            amount,
            paid_on,
            mode,
            days_late: 0,
            penalty_due: 0.0,
            status: DepositStatus::OnTime,
            recorded_by: recorded_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Clears the penalty and marks the deposit waived.
    pub fn waive(&mut self) {
        self.penalty_due = 0.0;
        self.status = DepositStatus::Waived;
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Deposit {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Deposit {
    fn display_label(&self) -> String {
        format!(
            "{} {} for {} [{}]",
            self.id, self.due_month, self.shareholder_id, self.status
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Lateness outcome of a recorded deposit.
pub enum DepositStatus {
    OnTime,
    Late,
    Waived,
}

impl DepositStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DepositStatus::OnTime => "On Time",
            DepositStatus::Late => "Late",
            DepositStatus::Waived => "Waived",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "ontime" => Some(DepositStatus::OnTime),
            "late" => Some(DepositStatus::Late),
            "waived" => Some(DepositStatus::Waived),
            _ => None,
        }
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
