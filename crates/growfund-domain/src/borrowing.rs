//! Domain model for loans issued against shareholder eligibility.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{normalize_label, Displayable, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Borrowing {
    pub id: String,
    pub shareholder_id: String,
    pub requested_amount: f64,
    /// Set only once the borrowing is approved; `None` while pending.
    #[serde(default)]
    pub approved_amount: Option<f64>,
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    #[serde(default)]
    pub due_on: Option<NaiveDate>,
    pub status: BorrowingStatus,
    /// Shareholders who consented to the request before approval.
    #[serde(default)]
    pub consenting_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Borrowing {
    pub fn new(
        id: impl Into<String>,
        shareholder_id: impl Into<String>,
        requested_amount: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            shareholder_id: shareholder_id.into(),
            requested_amount,
            approved_amount: None,
            started_on: None,
            due_on: None,
            status: BorrowingStatus::Pending,
            consenting_ids: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The amount the balance is tracked against: the approved amount
    /// once set, the requested amount until then.
    pub fn principal(&self) -> f64 {
        self.approved_amount.unwrap_or(self.requested_amount)
    }

    pub fn has_consent_from(&self, shareholder_id: &str) -> bool {
        self.consenting_ids
            .iter()
            .any(|id| id.eq_ignore_ascii_case(shareholder_id))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Borrowing {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Borrowing {
    fn display_label(&self) -> String {
        format!("{} -> {} [{}]", self.id, self.shareholder_id, self.status)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Lifecycle of a borrowing. Transitions are monotonic; no backward
/// moves are modeled.
pub enum BorrowingStatus {
    Pending,
    Approved,
    Active,
    Completed,
    Rejected,
}

impl BorrowingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BorrowingStatus::Pending => "Pending",
            BorrowingStatus::Approved => "Approved",
            BorrowingStatus::Active => "Active",
            BorrowingStatus::Completed => "Completed",
            BorrowingStatus::Rejected => "Rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "pending" => Some(BorrowingStatus::Pending),
            "approved" => Some(BorrowingStatus::Approved),
            "active" => Some(BorrowingStatus::Active),
            "completed" => Some(BorrowingStatus::Completed),
            "rejected" => Some(BorrowingStatus::Rejected),
            _ => None,
        }
    }

    /// Closed statuses accept no further repayments or transitions.
    pub fn is_closed(&self) -> bool {
        matches!(self, BorrowingStatus::Completed | BorrowingStatus::Rejected)
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    fn rank(&self) -> u8 {
        match self {
            BorrowingStatus::Pending => 0,
            BorrowingStatus::Approved => 1,
            BorrowingStatus::Active => 2,
            BorrowingStatus::Completed => 3,
            BorrowingStatus::Rejected => 4,
        }
    }

    /// Forward-only progression: each step moves one rank ahead, and
    /// rejection is reachable only from Pending.
    pub fn can_transition_to(&self, next: BorrowingStatus) -> bool {
        match next {
            BorrowingStatus::Rejected => matches!(self, BorrowingStatus::Pending),
            _ => !self.is_closed() && next.rank() == self.rank() + 1,
        }
    }
}

impl fmt::Display for BorrowingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_only_for_completed_and_rejected() {
        assert!(BorrowingStatus::Completed.is_closed());
        assert!(BorrowingStatus::Rejected.is_closed());
        assert!(!BorrowingStatus::Pending.is_closed());
        assert!(!BorrowingStatus::Approved.is_closed());
        assert!(!BorrowingStatus::Active.is_closed());
    }

    #[test]
    fn transitions_move_forward_only() {
        assert!(BorrowingStatus::Pending.can_transition_to(BorrowingStatus::Approved));
        assert!(BorrowingStatus::Approved.can_transition_to(BorrowingStatus::Active));
        assert!(BorrowingStatus::Active.can_transition_to(BorrowingStatus::Completed));
        assert!(!BorrowingStatus::Active.can_transition_to(BorrowingStatus::Approved));
        assert!(!BorrowingStatus::Completed.can_transition_to(BorrowingStatus::Active));
    }

    #[test]
    fn rejection_only_from_pending() {
        assert!(BorrowingStatus::Pending.can_transition_to(BorrowingStatus::Rejected));
        assert!(!BorrowingStatus::Active.can_transition_to(BorrowingStatus::Rejected));
        assert!(!BorrowingStatus::Rejected.can_transition_to(BorrowingStatus::Pending));
    }

    #[test]
    fn principal_prefers_approved_amount() {
        let mut borrowing = Borrowing::new("B0001", "SH001", 500.0);
        assert_eq!(borrowing.principal(), 500.0);
        borrowing.approved_amount = Some(400.0);
        assert_eq!(borrowing.principal(), 400.0);
    }
}
