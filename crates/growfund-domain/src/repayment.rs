//! Domain model for repayments and their approval progression.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{normalize_label, Displayable, PaymentMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repayment {
    /// Provisional identity assigned on entry; stable across the
    /// approval workflow.
    pub entry_id: Uuid,
    /// Final sequential identifier, assigned only when an admin
    /// finalizes the entry.
    #[serde(default)]
    pub id: Option<String>,
    pub borrowing_id: String,
    pub shareholder_id: String,
    pub principal_paid: f64,
    pub penalty_paid: f64,
    pub paid_on: NaiveDate,
    pub mode: PaymentMode,
    /// Outstanding balance this entry would leave once finalized.
    pub outstanding_after: f64,
    pub days_late: i64,
    pub penalty_due: f64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub approvals: Vec<ApprovalEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repayment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        borrowing_id: impl Into<String>,
        shareholder_id: impl Into<String>,
        principal_paid: f64,
        penalty_paid: f64,
        paid_on: NaiveDate,
        mode: PaymentMode,
    ) -> Self {
        let now = Utc::now();
        Self {
            entry_id: Uuid::new_v4(),
            id: None,
            borrowing_id: borrowing_id.into(),
            shareholder_id: shareholder_id.into(),
            principal_paid,
            penalty_paid,
            paid_on,
            mode,
            outstanding_after: 0.0,
            days_late: 0,
            penalty_due: 0.0,
            status: PaymentStatus::Pending,
            approvals: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the entry to `next`, recording who acted and when.
    /// Callers must have checked `can_advance_to` first.
    pub fn advance(&mut self, next: PaymentStatus, actor_id: &str, notes: Option<String>) {
        self.approvals.push(ApprovalEvent {
            stage: next,
            actor_id: actor_id.to_string(),
            notes,
            at: Utc::now(),
        });
        self.status = next;
        self.updated_at = Utc::now();
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.status, PaymentStatus::AdminApproved)
    }
}

impl Displayable for Repayment {
    fn display_label(&self) -> String {
        let id = self.id.as_deref().unwrap_or("(provisional)");
        format!("{} for {} [{}]", id, self.borrowing_id, self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One recorded step of the approval trail.
pub struct ApprovalEvent {
    pub stage: PaymentStatus,
    pub actor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Workflow position of a pending financial entry. Linear, no cycles:
/// Pending -> TreasurerApproved -> AdminApproved, with rejection
/// reachable from the two non-terminal stages.
#[derive(Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    TreasurerApproved,
    AdminApproved,
    Rejected,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::TreasurerApproved => "Treasurer Approved",
            PaymentStatus::AdminApproved => "Admin Approved",
            PaymentStatus::Rejected => "Rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "treasurerapproved" => Some(PaymentStatus::TreasurerApproved),
            "adminapproved" => Some(PaymentStatus::AdminApproved),
            "rejected" => Some(PaymentStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::AdminApproved | PaymentStatus::Rejected)
    }

    pub fn can_advance_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::TreasurerApproved)
                | (PaymentStatus::TreasurerApproved, PaymentStatus::AdminApproved)
                | (PaymentStatus::Pending, PaymentStatus::Rejected)
                | (PaymentStatus::TreasurerApproved, PaymentStatus::Rejected)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_is_linear() {
        assert!(PaymentStatus::Pending.can_advance_to(PaymentStatus::TreasurerApproved));
        assert!(PaymentStatus::TreasurerApproved.can_advance_to(PaymentStatus::AdminApproved));
        assert!(!PaymentStatus::Pending.can_advance_to(PaymentStatus::AdminApproved));
    }

    #[test]
    fn terminal_stages_accept_nothing() {
        for next in [
            PaymentStatus::Pending,
            PaymentStatus::TreasurerApproved,
            PaymentStatus::AdminApproved,
            PaymentStatus::Rejected,
        ] {
            assert!(!PaymentStatus::AdminApproved.can_advance_to(next));
            assert!(!PaymentStatus::Rejected.can_advance_to(next));
        }
    }

    #[test]
    fn advance_records_the_trail() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let mut entry = Repayment::new("B0001", "SH001", 100.0, 0.0, date, PaymentMode::Cash);
        entry.advance(
            PaymentStatus::TreasurerApproved,
            "SH002",
            Some("checked receipt".into()),
        );
        assert_eq!(entry.status, PaymentStatus::TreasurerApproved);
        assert_eq!(entry.approvals.len(), 1);
        assert_eq!(entry.approvals[0].actor_id, "SH002");
    }
}
