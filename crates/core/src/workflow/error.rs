//! Workflow error types.

use mfo_shared::AppError;
use mfo_shared::types::{ManagerId, TransactionId};
use thiserror::Error;

use crate::workflow::types::ApprovalState;

/// Errors that can occur during approval.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The actor lacks the required capability.
    #[error("Missing capability: {capability}")]
    PermissionDenied {
        /// Codename of the missing capability.
        capability: &'static str,
    },

    /// The deciding manager no longer exists or was deactivated.
    #[error("Manager {0} is not an active account")]
    InactiveManager(ManagerId),

    /// The transaction has already been decided.
    #[error("Transaction already processed ({state})")]
    AlreadyProcessed {
        /// State found on the transaction.
        state: ApprovalState,
    },

    /// Transaction not found.
    #[error("Transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PermissionDenied { .. } | Self::InactiveManager(_) => 403,
            Self::AlreadyProcessed { .. } => 400,
            Self::TransactionNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } | Self::InactiveManager(_) => "FORBIDDEN",
            Self::AlreadyProcessed { .. } => "ALREADY_PROCESSED",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::PermissionDenied { .. } | WorkflowError::InactiveManager(_) => {
                Self::Forbidden(err.to_string())
            }
            WorkflowError::AlreadyProcessed { .. } => Self::AlreadyProcessed(err.to_string()),
            WorkflowError::TransactionNotFound(_) => Self::NotFound(err.to_string()),
            WorkflowError::Database(msg) => Self::Database(msg),
        }
    }
}
