//! Domain model for fund members and their lifecycle.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{normalize_label, Displayable, Identifiable, NamedEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shareholder {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub joined_on: NaiveDate,
    #[serde(default)]
    pub exited_on: Option<NaiveDate>,
    pub share_balance: f64,
    pub role: ShareholderRole,
    pub status: ShareholderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shareholder {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        joined_on: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            joined_on,
            exited_on: None,
            share_balance: 0.0,
            role: ShareholderRole::Member,
            status: ShareholderStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, ShareholderStatus::Active)
    }

    /// Soft retirement: the record stays, the status flips.
    pub fn retire(&mut self, exited_on: NaiveDate) {
        self.status = ShareholderStatus::Inactive;
        self.exited_on = Some(exited_on);
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Shareholder {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Shareholder {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Shareholder {
    fn display_label(&self) -> String {
        format!("{} {} [{}]", self.id, self.name, self.status)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Role a member plays in the approval workflow.
#[derive(Default)]
pub enum ShareholderRole {
    #[default]
    Member,
    Treasurer,
    Admin,
}

impl ShareholderRole {
    pub fn label(&self) -> &'static str {
        match self {
            ShareholderRole::Member => "Member",
            ShareholderRole::Treasurer => "Treasurer",
            ShareholderRole::Admin => "Admin",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "member" => Some(ShareholderRole::Member),
            "treasurer" => Some(ShareholderRole::Treasurer),
            "admin" => Some(ShareholderRole::Admin),
            _ => None,
        }
    }

    /// Whether this role may endorse pending entries (first approval stage).
    pub fn can_endorse(&self) -> bool {
        matches!(self, ShareholderRole::Treasurer | ShareholderRole::Admin)
    }

    /// Whether this role may finalize pending entries (second approval stage).
    pub fn can_finalize(&self) -> bool {
        matches!(self, ShareholderRole::Admin)
    }
}

impl fmt::Display for ShareholderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Whether a member currently participates in the fund.
#[derive(Default)]
pub enum ShareholderStatus {
    #[default]
    Active,
    Inactive,
}

impl ShareholderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ShareholderStatus::Active => "Active",
            ShareholderStatus::Inactive => "Inactive",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "active" => Some(ShareholderStatus::Active),
            "inactive" => Some(ShareholderStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for ShareholderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
