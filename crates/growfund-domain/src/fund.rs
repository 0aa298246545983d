//! The fund book aggregate: every entity collection plus bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    action_item::ActionItem,
    borrowing::Borrowing,
    deposit::Deposit,
    ids,
    investment::Investment,
    penalty::Penalty,
    repayment::Repayment,
    shareholder::Shareholder,
};

/// Bumped whenever the persisted shape changes. v2 added the penalty
/// and action-item collections; older books default them in on load.
pub const CURRENT_SCHEMA_VERSION: u8 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundBook {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub shareholders: Vec<Shareholder>,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    #[serde(default)]
    pub borrowings: Vec<Borrowing>,
    #[serde(default)]
    pub repayments: Vec<Repayment>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub penalties: Vec<Penalty>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "FundBook::schema_version_default")]
    pub schema_version: u8,
}

impl FundBook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            shareholders: Vec::new(),
            deposits: Vec::new(),
            borrowings: Vec::new(),
            repayments: Vec::new(),
            investments: Vec::new(),
            penalties: Vec::new(),
            action_items: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        1
    }

    // -- lookups ---------------------------------------------------------

    pub fn shareholder(&self, id: &str) -> Option<&Shareholder> {
        self.shareholders
            .iter()
            .find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn shareholder_mut(&mut self, id: &str) -> Option<&mut Shareholder> {
        self.shareholders
            .iter_mut()
            .find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn borrowing(&self, id: &str) -> Option<&Borrowing> {
        self.borrowings
            .iter()
            .find(|b| b.id.eq_ignore_ascii_case(id))
    }

    pub fn borrowing_mut(&mut self, id: &str) -> Option<&mut Borrowing> {
        self.borrowings
            .iter_mut()
            .find(|b| b.id.eq_ignore_ascii_case(id))
    }

    pub fn repayment(&self, entry_id: Uuid) -> Option<&Repayment> {
        self.repayments.iter().find(|r| r.entry_id == entry_id)
    }

    pub fn repayment_mut(&mut self, entry_id: Uuid) -> Option<&mut Repayment> {
        self.repayments.iter_mut().find(|r| r.entry_id == entry_id)
    }

    pub fn investment_mut(&mut self, id: &str) -> Option<&mut Investment> {
        self.investments
            .iter_mut()
            .find(|i| i.id.eq_ignore_ascii_case(id))
    }

    pub fn repayments_for(&self, borrowing_id: &str) -> impl Iterator<Item = &Repayment> {
        let needle = borrowing_id.to_ascii_uppercase();
        self.repayments
            .iter()
            .filter(move |r| r.borrowing_id.eq_ignore_ascii_case(&needle))
    }

    pub fn open_action_items(&self) -> impl Iterator<Item = &ActionItem> {
        self.action_items.iter().filter(|item| item.is_open())
    }

    // -- mutations -------------------------------------------------------

    pub fn add_shareholder(&mut self, shareholder: Shareholder) -> String {
        let id = shareholder.id.clone();
        self.shareholders.push(shareholder);
        self.touch();
        id
    }

    pub fn add_deposit(&mut self, deposit: Deposit) -> String {
        let id = deposit.id.clone();
        self.deposits.push(deposit);
        self.touch();
        id
    }

    pub fn add_borrowing(&mut self, borrowing: Borrowing) -> String {
        let id = borrowing.id.clone();
        self.borrowings.push(borrowing);
        self.touch();
        id
    }

    pub fn add_repayment(&mut self, repayment: Repayment) -> Uuid {
        let entry_id = repayment.entry_id;
        self.repayments.push(repayment);
        self.touch();
        entry_id
    }

    pub fn add_investment(&mut self, investment: Investment) -> String {
        let id = investment.id.clone();
        self.investments.push(investment);
        self.touch();
        id
    }

    pub fn add_penalty(&mut self, penalty: Penalty) -> String {
        let id = penalty.id.clone();
        self.penalties.push(penalty);
        self.touch();
        id
    }

    pub fn add_action_item(&mut self, item: ActionItem) -> Uuid {
        let id = item.id;
        self.action_items.push(item);
        self.touch();
        id
    }

    /// Resolves every open action item pointing at `subject_id`.
    pub fn resolve_action_items(&mut self, subject_id: &str) {
        let mut touched = false;
        for item in self
            .action_items
            .iter_mut()
            .filter(|item| item.is_open() && item.subject_id.eq_ignore_ascii_case(subject_id))
        {
            item.resolve();
            touched = true;
        }
        if touched {
            self.touch();
        }
    }

    // -- identifier sequencing --------------------------------------------

    /// The highest id issued so far for `prefix`, by numeric suffix.
    /// Sequential scanning is the only uniqueness guarantee the scheme
    /// offers, so this must see every issued id.
    fn last_issued<'a>(
        &self,
        issued: impl Iterator<Item = &'a str>,
        prefix: &str,
    ) -> Option<String> {
        issued
            .filter_map(|id| ids::id_counter(id, prefix).map(|counter| (counter, id)))
            .max_by_key(|(counter, _)| *counter)
            .map(|(_, id)| id.to_string())
    }

    pub fn next_shareholder_id(&self) -> String {
        let (prefix, width) = ids::SHAREHOLDER_ID;
        let last = self.last_issued(self.shareholders.iter().map(|s| s.id.as_str()), prefix);
        ids::next_id(last.as_deref(), prefix, width)
    }

    pub fn next_borrowing_id(&self) -> String {
        let (prefix, width) = ids::BORROWING_ID;
        let last = self.last_issued(self.borrowings.iter().map(|b| b.id.as_str()), prefix);
        ids::next_id(last.as_deref(), prefix, width)
    }

    pub fn next_repayment_id(&self) -> String {
        let (prefix, width) = ids::REPAYMENT_ID;
        let last = self.last_issued(
            self.repayments.iter().filter_map(|r| r.id.as_deref()),
            prefix,
        );
        ids::next_id(last.as_deref(), prefix, width)
    }

    pub fn next_deposit_id(&self) -> String {
        let (prefix, width) = ids::DEPOSIT_ID;
        let last = self.last_issued(self.deposits.iter().map(|d| d.id.as_str()), prefix);
        ids::next_id(last.as_deref(), prefix, width)
    }

    pub fn next_investment_id(&self) -> String {
        let (prefix, width) = ids::INVESTMENT_ID;
        let last = self.last_issued(self.investments.iter().map(|i| i.id.as_str()), prefix);
        ids::next_id(last.as_deref(), prefix, width)
    }

    pub fn next_penalty_id(&self) -> String {
        let (prefix, width) = ids::PENALTY_ID;
        let last = self.last_issued(self.penalties.iter().map(|p| p.id.as_str()), prefix);
        ids::next_id(last.as_deref(), prefix, width)
    }
}
