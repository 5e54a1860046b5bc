//! Payment schedule queries.
//!
//! Rows are only written by product creation and transaction linking; this
//! repository reads them.

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

use crate::entities::{payment_schedules, payment_statuses};

/// Filter options for listing schedule entries.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    /// Owning product.
    pub product_id: Option<i32>,
    /// Payment status.
    pub status_id: Option<i32>,
    /// Due on or after.
    pub from: Option<NaiveDate>,
    /// Due on or before.
    pub to: Option<NaiveDate>,
}

/// Schedule entry with its status name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    /// The schedule row.
    #[serde(flatten)]
    pub entry: payment_schedules::Model,
    /// Status name, if a status is set.
    pub status: Option<String>,
}

/// Entries of a product in due order.
pub async fn for_product<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
) -> Result<Vec<ScheduleEntry>, DbErr> {
    let rows = payment_schedules::Entity::find()
        .find_also_related(payment_statuses::Entity)
        .filter(payment_schedules::Column::ProductId.eq(product_id))
        .order_by_asc(payment_schedules::Column::ScheduledDate)
        .order_by_asc(payment_schedules::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(into_entry).collect())
}

/// One entry by id.
pub async fn find_entry<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<ScheduleEntry>, DbErr> {
    let row = payment_schedules::Entity::find_by_id(id)
        .find_also_related(payment_statuses::Entity)
        .one(db)
        .await?;

    Ok(row.map(into_entry))
}

fn into_entry(
    (entry, status): (payment_schedules::Model, Option<payment_statuses::Model>),
) -> ScheduleEntry {
    ScheduleEntry {
        entry,
        status: status.map(|s| s.name),
    }
}

/// Payment schedule repository.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    db: DatabaseConnection,
}

impl ScheduleRepository {
    /// Creates a new schedule repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists entries matching the filter ordered by due date.
    pub async fn list(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleEntry>, DbErr> {
        let mut query =
            payment_schedules::Entity::find().find_also_related(payment_statuses::Entity);

        if let Some(product_id) = filter.product_id {
            query = query.filter(payment_schedules::Column::ProductId.eq(product_id));
        }
        if let Some(status_id) = filter.status_id {
            query = query.filter(payment_schedules::Column::StatusId.eq(status_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(payment_schedules::Column::ScheduledDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(payment_schedules::Column::ScheduledDate.lte(to));
        }

        let rows = query
            .order_by_asc(payment_schedules::Column::ScheduledDate)
            .order_by_asc(payment_schedules::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(into_entry).collect())
    }
}
