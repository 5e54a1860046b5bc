//! Workflow domain types for the approval gate.

use mfo_shared::types::ManagerId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::status::TransactionStatusName;

/// Approval state of a transaction.
///
/// Stored as a nullable boolean: `NULL` pending, `true` approved,
/// `false` rejected. The only transitions are out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    /// Awaiting a decision.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

impl ApprovalState {
    /// Maps the stored flag to a state.
    #[must_use]
    pub const fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => Self::Pending,
            Some(true) => Self::Approved,
            Some(false) => Self::Rejected,
        }
    }

    /// Maps the state to the stored flag.
    #[must_use]
    pub const fn to_flag(self) -> Option<bool> {
        match self {
            Self::Pending => None,
            Self::Approved => Some(true),
            Self::Rejected => Some(false),
        }
    }

    /// Returns the string representation of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Label shown to staff.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Ожидает",
            Self::Approved => "Одобрена",
            Self::Rejected => "Отклонена",
        }
    }

    /// Parses a state from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true once a decision has been taken.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision an approver takes on a pending transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    /// Accept the transaction.
    Approve,
    /// Decline the transaction; it is also marked cancelled.
    Reject,
}

impl ApprovalDecision {
    /// State the transaction ends up in.
    #[must_use]
    pub const fn target_state(self) -> ApprovalState {
        match self {
            Self::Approve => ApprovalState::Approved,
            Self::Reject => ApprovalState::Rejected,
        }
    }
}

/// Mutation to apply to a transaction after a valid decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalAction {
    /// New approval state.
    pub new_state: ApprovalState,
    /// Manager who took the decision.
    pub approved_by: ManagerId,
    /// Status to move the transaction to, if any.
    pub new_status: Option<TransactionStatusName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_mapping() {
        for state in [ApprovalState::Pending, ApprovalState::Approved, ApprovalState::Rejected] {
            assert_eq!(ApprovalState::from_flag(state.to_flag()), state);
        }
        assert_eq!(ApprovalState::from_flag(None), ApprovalState::Pending);
        assert_eq!(ApprovalState::Approved.to_flag(), Some(true));
        assert_eq!(ApprovalState::Rejected.to_flag(), Some(false));
    }

    #[test]
    fn test_parse_and_labels() {
        assert_eq!(ApprovalState::parse("PENDING"), Some(ApprovalState::Pending));
        assert_eq!(ApprovalState::parse("rejected"), Some(ApprovalState::Rejected));
        assert_eq!(ApprovalState::parse("posted"), None);
        assert_eq!(ApprovalState::Pending.label(), "Ожидает");
        assert_eq!(ApprovalState::Approved.label(), "Одобрена");
        assert_eq!(ApprovalState::Rejected.label(), "Отклонена");
    }

    #[test]
    fn test_terminal() {
        assert!(!ApprovalState::Pending.is_terminal());
        assert!(ApprovalState::Approved.is_terminal());
        assert!(ApprovalState::Rejected.is_terminal());
    }
}
