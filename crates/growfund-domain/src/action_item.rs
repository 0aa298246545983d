//! Approval inbox entries produced by the financial workflows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::normalize_label;
use crate::shareholder::ShareholderRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: Uuid,
    pub kind: ActionKind,
    /// Identifier of the entity awaiting a decision (borrowing id,
    /// repayment entry id, ...).
    pub subject_id: String,
    pub message: String,
    pub for_role: ShareholderRole,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ActionItem {
    pub fn new(
        kind: ActionKind,
        subject_id: impl Into<String>,
        message: impl Into<String>,
        for_role: ShareholderRole,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            subject_id: subject_id.into(),
            message: message.into(),
            for_role,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.resolved_at.is_none()
    }

    pub fn resolve(&mut self) {
        if self.resolved_at.is_none() {
            self.resolved_at = Some(Utc::now());
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    BorrowingRequest,
    RepaymentApproval,
    DepositReview,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::BorrowingRequest => "Borrowing Request",
            ActionKind::RepaymentApproval => "Repayment Approval",
            ActionKind::DepositReview => "Deposit Review",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "borrowingrequest" => Some(ActionKind::BorrowingRequest),
            "repaymentapproval" => Some(ActionKind::RepaymentApproval),
            "depositreview" => Some(ActionKind::DepositReview),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
