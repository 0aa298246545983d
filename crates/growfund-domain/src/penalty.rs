//! Domain model for penalties levied on shareholders.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{normalize_label, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penalty {
    pub id: String,
    pub shareholder_id: String,
    pub amount: f64,
    pub kind: PenaltyKind,
    pub reason: String,
    pub recorded_by: String,
    pub levied_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Penalty {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        shareholder_id: impl Into<String>,
        amount: f64,
        kind: PenaltyKind,
        reason: impl Into<String>,
        recorded_by: impl Into<String>,
        levied_on: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            shareholder_id: shareholder_id.into(),
            amount,
            kind,
            reason: reason.into(),
            recorded_by: recorded_by.into(),
            levied_on,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for Penalty {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Why a penalty was levied.
pub enum PenaltyKind {
    LateDeposit,
    LateRepayment,
    Other,
}

impl PenaltyKind {
    pub fn label(&self) -> &'static str {
        match self {
            PenaltyKind::LateDeposit => "Late Deposit",
            PenaltyKind::LateRepayment => "Late Repayment",
            PenaltyKind::Other => "Other",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "latedeposit" => Some(PenaltyKind::LateDeposit),
            "laterepayment" => Some(PenaltyKind::LateRepayment),
            "other" => Some(PenaltyKind::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
