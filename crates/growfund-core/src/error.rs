use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Fund not loaded")]
    FundNotLoaded,
    #[error("Fund not found: {0}")]
    FundNotFound(String),
    #[error("Shareholder not found: {0}")]
    ShareholderNotFound(String),
    #[error("Borrowing not found: {0}")]
    BorrowingNotFound(String),
    #[error("Repayment entry not found: {0}")]
    RepaymentNotFound(Uuid),
    #[error("Investment not found: {0}")]
    InvestmentNotFound(String),
    #[error("Deposit not found: {0}")]
    DepositNotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Mirror error: {0}")]
    Mirror(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
