//! Transaction approval workflow.
//!
//! A transaction starts Pending and an approver moves it, exactly once, to
//! Approved or Rejected. Creating a transaction against a scheduled payment
//! re-statuses that payment as Paid or Overdue.
//!
//! # Modules
//!
//! - `types` - Approval states, decisions and the resulting action
//! - `error` - Workflow-specific error types
//! - `service` - Decision and payment re-statusing rules

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{ApprovalAction, ApprovalDecision, ApprovalState};
