//! Aggregation helpers for fund-level summaries and report tables.

use growfund_domain::{BorrowingStatus, FundBook, InvestmentStatus};

use crate::borrowing_service::BorrowingService;

/// Fund-wide totals shown on the status screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FundSummary {
    pub shareholders_total: usize,
    pub shareholders_active: usize,
    pub share_balance_total: f64,
    pub deposits_total: f64,
    pub penalties_total: f64,
    pub borrowings_open: usize,
    pub outstanding_total: f64,
    pub repayments_pending: usize,
    pub investments_open: usize,
    pub invested_total: f64,
    pub action_items_open: usize,
}

/// A rendered report: a title, a header list, and rows of strings.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Aggregates fund data for summaries and the report/export commands.
pub struct SummaryService;

impl SummaryService {
    pub fn summarize(fund: &FundBook) -> FundSummary {
        let outstanding_total = fund
            .borrowings
            .iter()
            .filter(|b| b.status == BorrowingStatus::Active)
            .filter_map(|b| BorrowingService::outstanding(fund, &b.id).ok())
            .sum();
        FundSummary {
            shareholders_total: fund.shareholders.len(),
            shareholders_active: fund.shareholders.iter().filter(|s| s.is_active()).count(),
            share_balance_total: fund.shareholders.iter().map(|s| s.share_balance).sum(),
            deposits_total: fund.deposits.iter().map(|d| d.amount).sum(),
            penalties_total: fund.penalties.iter().map(|p| p.amount).sum(),
            borrowings_open: fund.borrowings.iter().filter(|b| b.status.is_open()).count(),
            outstanding_total,
            repayments_pending: fund
                .repayments
                .iter()
                .filter(|r| !r.status.is_terminal())
                .count(),
            investments_open: fund
                .investments
                .iter()
                .filter(|i| i.status == InvestmentStatus::Open)
                .count(),
            invested_total: fund.investments.iter().map(|i| i.amount).sum(),
            action_items_open: fund.open_action_items().count(),
        }
    }

    pub fn shareholders_report(fund: &FundBook) -> ReportTable {
        let mut table = ReportTable::new(
            "Shareholders",
            &["ID", "Name", "Phone", "Joined", "Shares", "Role", "Status"],
        );
        for s in &fund.shareholders {
            table.rows.push(vec![
                s.id.clone(),
                s.name.clone(),
                s.phone.clone(),
                s.joined_on.to_string(),
                format!("{:.2}", s.share_balance),
                s.role.to_string(),
                s.status.to_string(),
            ]);
        }
        table
    }

    pub fn deposits_report(fund: &FundBook) -> ReportTable {
        let mut table = ReportTable::new(
            "Deposits",
            &["ID", "Shareholder", "Month", "Amount", "Paid On", "Days Late", "Penalty", "Status"],
        );
        for d in &fund.deposits {
            table.rows.push(vec![
                d.id.clone(),
                d.shareholder_id.clone(),
                d.due_month.to_string(),
                format!("{:.2}", d.amount),
                d.paid_on.to_string(),
                d.days_late.to_string(),
                format!("{:.2}", d.penalty_due),
                d.status.to_string(),
            ]);
        }
        table
    }

    pub fn borrowings_report(fund: &FundBook) -> ReportTable {
        let mut table = ReportTable::new(
            "Borrowings",
            &["ID", "Shareholder", "Requested", "Approved", "Due", "Outstanding", "Status"],
        );
        for b in &fund.borrowings {
            let outstanding = if b.status == BorrowingStatus::Active {
                BorrowingService::outstanding(fund, &b.id)
                    .map(|value| format!("{:.2}", value))
                    .unwrap_or_else(|_| "-".into())
            } else {
                "-".into()
            };
            table.rows.push(vec![
                b.id.clone(),
                b.shareholder_id.clone(),
                format!("{:.2}", b.requested_amount),
                b.approved_amount
                    .map(|a| format!("{:.2}", a))
                    .unwrap_or_else(|| "-".into()),
                b.due_on.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                outstanding,
                b.status.to_string(),
            ]);
        }
        table
    }

    pub fn repayments_report(fund: &FundBook) -> ReportTable {
        let mut table = ReportTable::new(
            "Repayments",
            &["ID", "Borrowing", "Principal", "Penalty Due", "Paid On", "Mode", "Stage"],
        );
        for r in &fund.repayments {
            table.rows.push(vec![
                r.id.clone()
                    .unwrap_or_else(|| format!("({})", &r.entry_id.to_string()[..8])),
                r.borrowing_id.clone(),
                format!("{:.2}", r.principal_paid),
                format!("{:.2}", r.penalty_due),
                r.paid_on.to_string(),
                r.mode.to_string(),
                r.status.to_string(),
            ]);
        }
        table
    }

    pub fn penalties_report(fund: &FundBook) -> ReportTable {
        let mut table = ReportTable::new(
            "Penalties",
            &["ID", "Shareholder", "Amount", "Kind", "Reason", "Levied On"],
        );
        for p in &fund.penalties {
            table.rows.push(vec![
                p.id.clone(),
                p.shareholder_id.clone(),
                format!("{:.2}", p.amount),
                p.kind.to_string(),
                p.reason.clone(),
                p.levied_on.to_string(),
            ]);
        }
        table
    }

    pub fn investments_report(fund: &FundBook) -> ReportTable {
        let mut table = ReportTable::new(
            "Investments",
            &["ID", "Title", "Amount", "Invested", "Expected %", "Actual %", "Variance %", "Status"],
        );
        for i in &fund.investments {
            let (actual, variance) = match &i.returns {
                Some(ret) => (
                    format!("{:.2}", ret.actual_return_percent),
                    format!("{:+.2}", ret.variance_percent),
                ),
                None => ("-".into(), "-".into()),
            };
            table.rows.push(vec![
                i.id.clone(),
                i.title.clone(),
                format!("{:.2}", i.amount),
                i.invested_on.to_string(),
                format!("{:.2}", i.expected_return_percent),
                actual,
                variance,
                i.status.to_string(),
            ]);
        }
        table
    }
}
