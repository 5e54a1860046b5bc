//! Workflow repository for the transaction approval gate.
//!
//! The decision is validated by `mfo_core::workflow::WorkflowService` and
//! applied here inside one database transaction: the row is locked where the
//! backend supports it, and the update only matches while `approved IS NULL`,
//! so of two concurrent decisions exactly one succeeds.
//!
//! Capabilities are resolved from the manager's current role on every
//! decision, never from the access token.

use mfo_core::auth::Capabilities;
use mfo_core::workflow::{ApprovalDecision, ApprovalState, WorkflowError, WorkflowService};
use mfo_shared::types::{ManagerId, TransactionId};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, TransactionTrait, sea_query::Expr,
};
use tracing::{info, warn};

use super::manager::ManagerRepository;
use super::status as registry;
use crate::entities::transactions;

fn db_error(e: sea_orm::DbErr) -> WorkflowError {
    WorkflowError::Database(e.to_string())
}

/// Repository applying approval decisions.
#[derive(Debug, Clone)]
pub struct WorkflowRepository {
    db: DatabaseConnection,
}

impl WorkflowRepository {
    /// Creates a new workflow repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Approves a pending transaction.
    pub async fn approve(
        &self,
        transaction_id: TransactionId,
        actor: ManagerId,
    ) -> Result<transactions::Model, WorkflowError> {
        self.decide(transaction_id, ApprovalDecision::Approve, actor)
            .await
    }

    /// Rejects a pending transaction and marks it "Отменено".
    pub async fn reject(
        &self,
        transaction_id: TransactionId,
        actor: ManagerId,
    ) -> Result<transactions::Model, WorkflowError> {
        self.decide(transaction_id, ApprovalDecision::Reject, actor)
            .await
    }

    /// Loads the actor and the capabilities their role grants right now.
    async fn actor_capabilities(&self, actor: ManagerId) -> Result<Capabilities, WorkflowError> {
        let managers = ManagerRepository::new(self.db.clone());
        let Some(manager) = managers
            .find_by_id(actor.into_inner())
            .await
            .map_err(db_error)?
            .filter(|m| m.is_active)
        else {
            warn!(manager_id = %actor, "Decision by missing or inactive manager refused");
            return Err(WorkflowError::InactiveManager(actor));
        };
        managers.capabilities(&manager).await.map_err(db_error)
    }

    /// Applies a decision to a transaction.
    ///
    /// # Errors
    ///
    /// * `InactiveManager` when the actor is gone or deactivated
    /// * `PermissionDenied` before the transaction is read when the actor's
    ///   role lacks the capability
    /// * `TransactionNotFound` when no such transaction exists
    /// * `AlreadyProcessed` when the transaction was decided already, including
    ///   by a concurrent request that committed first
    pub async fn decide(
        &self,
        transaction_id: TransactionId,
        decision: ApprovalDecision,
        actor: ManagerId,
    ) -> Result<transactions::Model, WorkflowError> {
        let capabilities = self.actor_capabilities(actor).await?;
        WorkflowService::authorize(&capabilities)?;

        let txn = self.db.begin().await.map_err(db_error)?;

        let mut query = transactions::Entity::find_by_id(transaction_id.into_inner());
        if txn.get_database_backend() == DatabaseBackend::Postgres {
            query = query.lock_exclusive();
        }
        let transaction = query
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(WorkflowError::TransactionNotFound(transaction_id))?;

        let action = WorkflowService::decide(
            ApprovalState::from_flag(transaction.approved),
            decision,
            actor,
            &capabilities,
        )?;

        let mut update = transactions::Entity::update_many()
            .col_expr(
                transactions::Column::Approved,
                Expr::value(action.new_state.to_flag()),
            )
            .col_expr(
                transactions::Column::ApprovedBy,
                Expr::value(action.approved_by.into_inner()),
            );
        if let Some(status) = action.new_status {
            let status_id = registry::transaction_status_id(&txn, status)
                .await
                .map_err(db_error)?;
            update = update.col_expr(transactions::Column::StatusId, Expr::value(status_id));
        }

        let result = update
            .filter(transactions::Column::Id.eq(transaction.id))
            .filter(transactions::Column::Approved.is_null())
            .exec(&txn)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            let current = transactions::Entity::find_by_id(transaction.id)
                .one(&txn)
                .await
                .map_err(db_error)?
                .map_or(ApprovalState::Pending, |t| ApprovalState::from_flag(t.approved));
            warn!(
                transaction_id = transaction.id,
                state = current.as_str(),
                "Concurrent decision won, nothing applied"
            );
            return Err(WorkflowError::AlreadyProcessed { state: current });
        }

        let updated = transactions::Entity::find_by_id(transaction.id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(WorkflowError::TransactionNotFound(transaction_id))?;

        txn.commit().await.map_err(db_error)?;

        info!(
            transaction_id = updated.id,
            decision = action.new_state.as_str(),
            approved_by = %actor,
            "Transaction decided"
        );

        Ok(updated)
    }
}
