//! Report repository: loads what the schedule report needs.

use mfo_core::reports::{ReportError, ReportProduct, ReportService, ScheduleLine, ScheduleReport};
use mfo_shared::types::{ProductId, round_money};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::entities::{clients, contacts, payment_schedules, product_types, products};

/// Error types for report loading.
#[derive(Debug, thiserror::Error)]
pub enum ReportDataError {
    /// Product missing or unreadable.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportDataError> for mfo_shared::AppError {
    fn from(err: ReportDataError) -> Self {
        match err {
            ReportDataError::Report(e) => e.into(),
            ReportDataError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads the product header fields and client contact.
    pub async fn load_product(&self, id: ProductId) -> Result<ReportProduct, ReportDataError> {
        let (product, product_type) = products::Entity::find_by_id(id.into_inner())
            .find_also_related(product_types::Entity)
            .one(&self.db)
            .await?
            .ok_or(ReportError::ProductNotFound(id))?;
        let product_type = product_type.ok_or(ReportError::ProductNotFound(id))?;

        let contact = clients::Entity::find_by_id(product.client_id)
            .find_also_related(contacts::Entity)
            .one(&self.db)
            .await?
            .and_then(|(_, contact)| contact);
        let (client_name, client_phone) =
            contact.map_or_else(Default::default, |c| (c.name, c.phone));

        Ok(ReportProduct {
            product_id: id,
            client_name,
            client_phone,
            product_type: product_type.name,
            behavior: product_type.behavior.into(),
            amount: round_money(product.amount),
            interest_rate: round_money(product.interest_rate),
            duration: product.duration,
        })
    }

    /// Reads the persisted schedule ordered by due date, then id.
    pub async fn load_lines(&self, id: ProductId) -> Result<Vec<ScheduleLine>, DbErr> {
        let rows = payment_schedules::Entity::find()
            .filter(payment_schedules::Column::ProductId.eq(id.into_inner()))
            .order_by_asc(payment_schedules::Column::ScheduledDate)
            .order_by_asc(payment_schedules::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ScheduleLine {
                scheduled_date: row.scheduled_date,
                amount: round_money(row.amount),
            })
            .collect())
    }

    /// Loads and projects the schedule report of a product.
    pub async fn build(&self, id: ProductId) -> Result<ScheduleReport, ReportDataError> {
        let product = self.load_product(id).await?;
        let lines = self.load_lines(id).await?;
        debug!(product_id = %id, entries = lines.len(), "Schedule report loaded");
        Ok(ReportService::build(product, &lines))
    }
}
