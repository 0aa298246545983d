//! growfund-domain
//!
//! Pure domain models for the fund book (Shareholder, Deposit, Borrowing,
//! Repayment, Investment, Penalty, ActionItem) and their status enums.
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod action_item;
pub mod borrowing;
pub mod common;
pub mod deposit;
pub mod due_month;
pub mod fund;
pub mod ids;
pub mod investment;
pub mod penalty;
pub mod repayment;
pub mod shareholder;

pub use action_item::*;
pub use borrowing::*;
pub use common::*;
pub use deposit::*;
pub use due_month::*;
pub use fund::*;
pub use investment::*;
pub use penalty::*;
pub use repayment::*;
pub use shareholder::*;
