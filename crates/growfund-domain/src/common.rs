//! Shared traits and enums used across fund entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exposes the stable string identifier of an entity stored in the fund book.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates how a payment was handed over.
#[derive(Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    BankTransfer,
    Online,
}

impl PaymentMode {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::BankTransfer => "Bank Transfer",
            PaymentMode::Online => "Online",
        }
    }

    /// Case-insensitive lookup by label or bare token.
    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "cash" => Some(PaymentMode::Cash),
            "banktransfer" | "bank" => Some(PaymentMode::BankTransfer),
            "online" => Some(PaymentMode::Online),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercases a label and strips separators so lookups tolerate
/// `bank-transfer`, `Bank Transfer`, and `banktransfer` alike.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_mode_lookup_tolerates_separators() {
        assert_eq!(
            PaymentMode::from_label("Bank Transfer"),
            Some(PaymentMode::BankTransfer)
        );
        assert_eq!(
            PaymentMode::from_label("bank-transfer"),
            Some(PaymentMode::BankTransfer)
        );
        assert_eq!(PaymentMode::from_label("carrier pigeon"), None);
    }
}
