//! Transaction repository: recording client transactions and settling schedule entries.

use chrono::{DateTime, Utc};
use mfo_core::workflow::{ApprovalState, WorkflowService};
use mfo_shared::types::{PageRequest, TransactionId, round_money};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::{info, warn};

use super::schedule::{self, ScheduleEntry};
use super::status as registry;
use crate::entities::{payment_schedules, products, transaction_types, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// Referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    /// Product belongs to another client.
    #[error("Product {product_id} does not belong to client {client_id}")]
    ClientMismatch {
        /// Client given in the request.
        client_id: i32,
        /// Product given in the request.
        product_id: i32,
    },

    /// Referenced transaction type does not exist.
    #[error("Transaction type not found: {0}")]
    TransactionTypeNotFound(i32),

    /// Amount is zero or negative.
    #[error("Transaction amount must be positive")]
    NonPositiveAmount,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for mfo_shared::AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::ProductNotFound(_)
            | TransactionError::ClientMismatch { .. }
            | TransactionError::TransactionTypeNotFound(_)
            | TransactionError::NonPositiveAmount => Self::Validation(err.to_string()),
            TransactionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for recording a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Paying or receiving client.
    pub client_id: i32,
    /// Product the money belongs to.
    pub product_id: i32,
    /// Amount moved.
    pub amount: Decimal,
    /// Optional classification.
    pub transaction_type_id: Option<i32>,
    /// Schedule entry this transaction settles.
    pub payment_schedule_id: Option<i32>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Approval state.
    pub approval: Option<ApprovalState>,
    /// Client.
    pub client_id: Option<i32>,
    /// Product.
    pub product_id: Option<i32>,
}

/// Newly recorded transaction and the schedule entry it settled, if any.
#[derive(Debug, Clone)]
pub struct CreatedTransaction {
    /// The transaction record, pending approval.
    pub transaction: transactions::Model,
    /// The linked schedule entry after re-statusing, with its status name.
    pub settled: Option<ScheduleEntry>,
}

/// Links a schedule entry to `transaction` and re-statuses it.
///
/// Returns `None` without failing when the entry is missing, belongs to
/// another product, or is already linked.
async fn settle_schedule_entry<C: ConnectionTrait>(
    db: &C,
    schedule_id: i32,
    transaction: &transactions::Model,
) -> Result<Option<ScheduleEntry>, DbErr> {
    let Some(entry) = payment_schedules::Entity::find_by_id(schedule_id).one(db).await? else {
        warn!(
            transaction_id = transaction.id,
            schedule_id, "Payment schedule entry not found, transaction left unlinked"
        );
        return Ok(None);
    };
    if entry.product_id != transaction.product_id {
        warn!(
            transaction_id = transaction.id,
            schedule_id,
            schedule_product_id = entry.product_id,
            "Payment schedule entry belongs to another product, transaction left unlinked"
        );
        return Ok(None);
    }

    let paid_on = transaction.date.date_naive();
    let status = WorkflowService::payment_status_for(paid_on, entry.scheduled_date);
    let status_id = registry::payment_status_id(db, status).await?;

    let result = payment_schedules::Entity::update_many()
        .col_expr(
            payment_schedules::Column::TransactionId,
            Expr::value(transaction.id),
        )
        .col_expr(payment_schedules::Column::ActualDate, Expr::value(paid_on))
        .col_expr(payment_schedules::Column::StatusId, Expr::value(status_id))
        .filter(payment_schedules::Column::Id.eq(entry.id))
        .filter(payment_schedules::Column::TransactionId.is_null())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        warn!(
            transaction_id = transaction.id,
            schedule_id,
            linked_to = ?entry.transaction_id,
            "Payment schedule entry already settled, transaction left unlinked"
        );
        return Ok(None);
    }

    info!(
        transaction_id = transaction.id,
        schedule_id,
        status = status.as_str(),
        "Payment schedule entry settled"
    );
    schedule::find_entry(db, entry.id).await
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a pending transaction dated `now`, settling the given schedule
    /// entry in the same database transaction.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
        now: DateTime<Utc>,
    ) -> Result<CreatedTransaction, TransactionError> {
        let amount = round_money(input.amount);
        if amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }

        let txn = self.db.begin().await?;

        let product = products::Entity::find_by_id(input.product_id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::ProductNotFound(input.product_id))?;
        if product.client_id != input.client_id {
            return Err(TransactionError::ClientMismatch {
                client_id: input.client_id,
                product_id: product.id,
            });
        }
        if let Some(type_id) = input.transaction_type_id {
            if transaction_types::Entity::find_by_id(type_id)
                .one(&txn)
                .await?
                .is_none()
            {
                return Err(TransactionError::TransactionTypeNotFound(type_id));
            }
        }

        let transaction = transactions::ActiveModel {
            client_id: Set(input.client_id),
            product_id: Set(product.id),
            amount: Set(amount),
            transaction_type_id: Set(input.transaction_type_id),
            date: Set(now),
            approved: Set(ApprovalState::Pending.to_flag()),
            approved_by: Set(None),
            status_id: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let settled = match input.payment_schedule_id {
            Some(schedule_id) => settle_schedule_entry(&txn, schedule_id, &transaction).await?,
            None => None,
        };

        txn.commit().await?;

        info!(
            transaction_id = transaction.id,
            product_id = transaction.product_id,
            amount = %transaction.amount,
            settled = settled.is_some(),
            "Transaction recorded"
        );

        Ok(CreatedTransaction {
            transaction,
            settled,
        })
    }

    /// Finds a transaction by id.
    pub async fn find(&self, id: TransactionId) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Lists transactions matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), TransactionError> {
        let mut query = transactions::Entity::find();

        query = match filter.approval {
            Some(ApprovalState::Pending) => query.filter(transactions::Column::Approved.is_null()),
            Some(state) => query.filter(transactions::Column::Approved.eq(state.to_flag())),
            None => query,
        };
        if let Some(client_id) = filter.client_id {
            query = query.filter(transactions::Column::ClientId.eq(client_id));
        }
        if let Some(product_id) = filter.product_id {
            query = query.filter(transactions::Column::ProductId.eq(product_id));
        }

        let paginator = query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_index()).await?;

        Ok((rows, total))
    }
}
