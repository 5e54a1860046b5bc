//! Well-known names of rows in the status tables.
//!
//! Status rows are looked up by name and created on first use, so these
//! labels are the stable identity of each status; they are shown to staff as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statuses of a scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatusName {
    /// Generated and awaiting payment.
    Scheduled,
    /// Paid on or before the due date.
    Paid,
    /// Paid after the due date.
    Overdue,
}

impl PaymentStatusName {
    /// Display label stored in `payment_statuses.name`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Назначен",
            Self::Paid => "Оплачен",
            Self::Overdue => "Просрочен",
        }
    }
}

/// Statuses a transaction can be moved to by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatusName {
    /// Set when an approver rejects the transaction.
    Cancelled,
}

impl TransactionStatusName {
    /// Display label stored in `transaction_statuses.name`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "Отменено",
        }
    }
}

/// Statuses of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatusName {
    /// Assigned to newly opened products when no status is given.
    Active,
    /// Product fully settled.
    Closed,
}

impl ProductStatusName {
    /// Display label stored in `product_statuses.name`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Активен",
            Self::Closed => "Закрыт",
        }
    }
}

/// The three status tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// `product_statuses`
    Product,
    /// `payment_statuses`
    Payment,
    /// `transaction_statuses`
    Transaction,
}

impl StatusKind {
    /// Parses a kind from a path segment.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "product" => Some(Self::Product),
            "payment" => Some(Self::Payment),
            "transaction" => Some(Self::Transaction),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransactionStatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProductStatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(PaymentStatusName::Scheduled.as_str(), "Назначен");
        assert_eq!(PaymentStatusName::Paid.to_string(), "Оплачен");
        assert_eq!(PaymentStatusName::Overdue.as_str(), "Просрочен");
        assert_eq!(TransactionStatusName::Cancelled.as_str(), "Отменено");
        assert_eq!(ProductStatusName::Active.as_str(), "Активен");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(StatusKind::parse("Payment"), Some(StatusKind::Payment));
        assert_eq!(StatusKind::parse("product"), Some(StatusKind::Product));
        assert_eq!(StatusKind::parse("transaction "), Some(StatusKind::Transaction));
        assert_eq!(StatusKind::parse("client"), None);
    }
}
