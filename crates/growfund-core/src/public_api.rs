//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! This module exposes a simplified API that other frontends (CLI, GUI,
//! FFI) can rely on without depending on the entire service surface
//! area.

use chrono::NaiveDate;
use growfund_domain::{DueMonth, FundBook, PaymentMode, ShareholderRole};
use uuid::Uuid;

use crate::{
    borrowing_service::BorrowingService, calc, deposit_service::DepositService,
    error::CoreError, repayment_service::RepaymentService,
    shareholder_service::ShareholderService, summary_service::{FundSummary, SummaryService},
};

/// Creates a new fund book with the supplied name.
pub fn api_create_fund(name: impl Into<String>) -> FundBook {
    FundBook::new(name)
}

/// Registers a member and returns the issued identifier.
pub fn api_register_shareholder(
    fund: &mut FundBook,
    name: &str,
    phone: &str,
    joined_on: NaiveDate,
    role: ShareholderRole,
) -> Result<String, CoreError> {
    ShareholderService::register(fund, name, phone, None, joined_on, role)
}

/// Records a monthly deposit at the default penalty rate.
pub fn api_record_deposit(
    fund: &mut FundBook,
    shareholder_id: &str,
    due_month: DueMonth,
    amount: f64,
    paid_on: NaiveDate,
    recorded_by: &str,
) -> Result<String, CoreError> {
    DepositService::record(
        fund,
        shareholder_id,
        due_month,
        amount,
        paid_on,
        PaymentMode::Cash,
        calc::DAILY_PENALTY_RATE,
        recorded_by,
    )
}

/// Files a borrowing request and returns the issued identifier.
pub fn api_request_borrowing(
    fund: &mut FundBook,
    shareholder_id: &str,
    amount: f64,
) -> Result<String, CoreError> {
    BorrowingService::request(fund, shareholder_id, amount, None)
}

/// Records a repayment entry at the default penalty rate.
pub fn api_record_repayment(
    fund: &mut FundBook,
    borrowing_id: &str,
    principal: f64,
    paid_on: NaiveDate,
) -> Result<Uuid, CoreError> {
    RepaymentService::record(
        fund,
        borrowing_id,
        principal,
        0.0,
        paid_on,
        PaymentMode::Cash,
        calc::DAILY_PENALTY_RATE,
    )
}

/// Provides the fund-wide totals snapshot.
pub fn api_fund_summary(fund: &FundBook) -> FundSummary {
    SummaryService::summarize(fund)
}
