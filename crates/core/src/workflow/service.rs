//! Approval decisions and payment re-statusing.

use chrono::NaiveDate;
use mfo_shared::types::ManagerId;

use crate::auth::{Capabilities, Capability};
use crate::status::{PaymentStatusName, TransactionStatusName};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalAction, ApprovalDecision, ApprovalState};

/// Stateless service for the approval gate.
pub struct WorkflowService;

impl WorkflowService {
    /// Validates a decision and returns the mutation to apply.
    ///
    /// The capability is checked before the state, so a caller without
    /// `approve_transaction` learns nothing about the transaction.
    ///
    /// # Errors
    ///
    /// * `PermissionDenied` when `capabilities` lacks `approve_transaction`
    /// * `AlreadyProcessed` when `current` is not `Pending`
    pub fn decide(
        current: ApprovalState,
        decision: ApprovalDecision,
        actor: ManagerId,
        capabilities: &Capabilities,
    ) -> Result<ApprovalAction, WorkflowError> {
        Self::authorize(capabilities)?;

        if current.is_terminal() {
            return Err(WorkflowError::AlreadyProcessed { state: current });
        }

        Ok(ApprovalAction {
            new_state: decision.target_state(),
            approved_by: actor,
            new_status: match decision {
                ApprovalDecision::Approve => None,
                ApprovalDecision::Reject => Some(TransactionStatusName::Cancelled),
            },
        })
    }

    /// Checks the approval capability alone.
    pub fn authorize(capabilities: &Capabilities) -> Result<(), WorkflowError> {
        if capabilities.has(Capability::ApproveTransaction) {
            Ok(())
        } else {
            Err(WorkflowError::PermissionDenied {
                capability: Capability::ApproveTransaction.codename(),
            })
        }
    }

    /// Status of a scheduled payment settled by a transaction made on `paid_on`.
    ///
    /// Paying on the due date itself counts as on time.
    #[must_use]
    pub fn payment_status_for(paid_on: NaiveDate, scheduled_date: NaiveDate) -> PaymentStatusName {
        if paid_on > scheduled_date {
            PaymentStatusName::Overdue
        } else {
            PaymentStatusName::Paid
        }
    }
}
