//! Schedule domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a product type moves money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductBehavior {
    /// The client places money and receives profit.
    Deposit,
    /// The client borrows money and repays it with interest.
    Credit,
}

impl ProductBehavior {
    /// Returns the string representation of the behavior.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Credit => "credit",
        }
    }

    /// Parses a behavior from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for ProductBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial terms of a product that determine its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTerms {
    /// Principal.
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Term in months.
    pub duration: i32,
    /// Credit or deposit.
    pub behavior: ProductBehavior,
}

/// One computed installment, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledPayment {
    /// 1-based installment number.
    pub installment: u32,
    /// Amount due, quantized to kopecks.
    pub amount: Decimal,
    /// Due date.
    pub scheduled_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_parse() {
        assert_eq!(ProductBehavior::parse("deposit"), Some(ProductBehavior::Deposit));
        assert_eq!(ProductBehavior::parse(" CREDIT "), Some(ProductBehavior::Credit));
        assert_eq!(ProductBehavior::parse("leasing"), None);
    }

    #[test]
    fn test_behavior_display() {
        assert_eq!(ProductBehavior::Deposit.to_string(), "deposit");
        assert_eq!(ProductBehavior::Credit.to_string(), "credit");
    }
}
