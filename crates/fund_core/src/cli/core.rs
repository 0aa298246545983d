//! Command errors and shared argument parsing helpers.

use chrono::NaiveDate;
use growfund_core::CoreError;
use growfund_domain::{DueMonth, PaymentMode};
use thiserror::Error;

pub use crate::core::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("exit requested")]
    ExitRequested,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Fund not loaded")]
    FundNotLoaded,
    #[error("{0}")]
    Command(String),
    #[error(transparent)]
    Core(CoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

impl CommandError {
    /// Maps the not-loaded case to its dedicated variant so the shell
    /// can print a getting-started hint.
    pub fn from_core(err: CoreError) -> Self {
        match err {
            CoreError::FundNotLoaded => CommandError::FundNotLoaded,
            other => CommandError::Core(other),
        }
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::from_core(err)
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a YYYY-MM-DD date", value))
    })
}

pub(crate) fn parse_amount(value: &str) -> Result<f64, CommandError> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not an amount", value)))?;
    if !amount.is_finite() {
        return Err(CommandError::InvalidArguments(format!(
            "`{}` is not an amount",
            value
        )));
    }
    Ok(amount)
}

pub(crate) fn parse_due_month(value: &str) -> Result<DueMonth, CommandError> {
    DueMonth::parse(value).map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn parse_mode(value: Option<&str>) -> Result<PaymentMode, CommandError> {
    match value {
        None => Ok(PaymentMode::default()),
        Some(raw) => PaymentMode::from_label(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "`{}` is not a payment mode (cash|bank-transfer|online)",
                raw
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_amounts() {
        assert!(parse_date("2025-03-10").is_ok());
        assert!(parse_date("10-03-2025").is_err());
        assert_eq!(parse_amount("150.50").unwrap(), 150.50);
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn parses_due_months_and_modes() {
        assert!(parse_due_month("Mar-2025").is_ok());
        assert!(parse_due_month("March 2025").is_err());
        assert_eq!(parse_mode(None).unwrap(), PaymentMode::Cash);
        assert_eq!(
            parse_mode(Some("bank-transfer")).unwrap(),
            PaymentMode::BankTransfer
        );
        assert!(parse_mode(Some("cheque")).is_err());
    }
}
