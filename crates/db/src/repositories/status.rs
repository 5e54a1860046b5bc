//! Status registry: get-or-create of named rows in the three status tables.
//!
//! Every lookup inserts with `ON CONFLICT (name) DO NOTHING` and then selects
//! by name, so two requests racing to create the same status both end up with
//! the one surviving row.

use mfo_core::status::{PaymentStatusName, ProductStatusName, StatusKind, TransactionStatusName};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, sea_query::OnConflict,
};
use serde::Serialize;

use crate::entities::{payment_statuses, product_statuses, transaction_statuses};

/// Width of the `name` column in every status table.
pub const MAX_STATUS_NAME_LEN: usize = 50;

/// Error types for status operations.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// Status name is blank.
    #[error("Status name must not be empty")]
    EmptyName,

    /// Status name does not fit the name column.
    #[error("Status name must be at most {max} characters")]
    NameTooLong {
        /// Longest accepted name, in characters.
        max: usize,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StatusError> for mfo_shared::AppError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::EmptyName | StatusError::NameTooLong { .. } => {
                Self::Validation(err.to_string())
            }
            StatusError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

macro_rules! get_or_create_in {
    ($table:ident, $db:expr, $name:expr) => {{
        let name: &str = $name;
        $table::Entity::insert($table::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column($table::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning($db)
        .await?;

        $table::Entity::find()
            .filter($table::Column::Name.eq(name))
            .one($db)
            .await?
            .map(|row| StatusRow {
                id: row.id,
                name: row.name,
            })
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("{} '{}'", stringify!($table), name))
            })
    }};
}

macro_rules! list_in {
    ($table:ident, $db:expr) => {{
        $table::Entity::find()
            .order_by_asc($table::Column::Id)
            .all($db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .map(|row| StatusRow {
                        id: row.id,
                        name: row.name,
                    })
                    .collect::<Vec<_>>()
            })
    }};
}

macro_rules! find_in {
    ($table:ident, $db:expr, $id:expr) => {{
        $table::Entity::find_by_id($id)
            .one($db)
            .await
            .map(|row| {
                row.map(|row| StatusRow {
                    id: row.id,
                    name: row.name,
                })
            })
    }};
}

/// A row of any status table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    /// Row ID.
    pub id: i32,
    /// Display name.
    pub name: String,
}

/// Returns the id of the named status in `kind`'s table, creating it if needed.
///
/// Usable on a plain connection or inside a database transaction.
pub async fn get_or_create<C: ConnectionTrait>(
    db: &C,
    kind: StatusKind,
    name: &str,
) -> Result<StatusRow, DbErr> {
    match kind {
        StatusKind::Product => get_or_create_in!(product_statuses, db, name),
        StatusKind::Payment => get_or_create_in!(payment_statuses, db, name),
        StatusKind::Transaction => get_or_create_in!(transaction_statuses, db, name),
    }
}

/// Id of a well-known payment status.
pub async fn payment_status_id<C: ConnectionTrait>(
    db: &C,
    status: PaymentStatusName,
) -> Result<i32, DbErr> {
    get_or_create(db, StatusKind::Payment, status.as_str())
        .await
        .map(|row| row.id)
}

/// Id of a well-known transaction status.
pub async fn transaction_status_id<C: ConnectionTrait>(
    db: &C,
    status: TransactionStatusName,
) -> Result<i32, DbErr> {
    get_or_create(db, StatusKind::Transaction, status.as_str())
        .await
        .map(|row| row.id)
}

/// Id of a well-known product status.
pub async fn product_status_id<C: ConnectionTrait>(
    db: &C,
    status: ProductStatusName,
) -> Result<i32, DbErr> {
    get_or_create(db, StatusKind::Product, status.as_str())
        .await
        .map(|row| row.id)
}

/// Looks up a status row by id.
pub async fn find<C: ConnectionTrait>(
    db: &C,
    kind: StatusKind,
    id: i32,
) -> Result<Option<StatusRow>, DbErr> {
    match kind {
        StatusKind::Product => find_in!(product_statuses, db, id),
        StatusKind::Payment => find_in!(payment_statuses, db, id),
        StatusKind::Transaction => find_in!(transaction_statuses, db, id),
    }
}

/// Status table access for listing and staff-created statuses.
#[derive(Debug, Clone)]
pub struct StatusRepository {
    db: DatabaseConnection,
}

impl StatusRepository {
    /// Creates a new status repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every status of a kind in creation order.
    pub async fn list(&self, kind: StatusKind) -> Result<Vec<StatusRow>, StatusError> {
        let rows = match kind {
            StatusKind::Product => list_in!(product_statuses, &self.db),
            StatusKind::Payment => list_in!(payment_statuses, &self.db),
            StatusKind::Transaction => list_in!(transaction_statuses, &self.db),
        }?;
        Ok(rows)
    }

    /// Returns the named status, creating it on first use.
    pub async fn get_or_create(
        &self,
        kind: StatusKind,
        name: &str,
    ) -> Result<StatusRow, StatusError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StatusError::EmptyName);
        }
        if name.chars().count() > MAX_STATUS_NAME_LEN {
            return Err(StatusError::NameTooLong {
                max: MAX_STATUS_NAME_LEN,
            });
        }
        Ok(get_or_create(&self.db, kind, name).await?)
    }

    /// Looks up a status by id.
    pub async fn find(&self, kind: StatusKind, id: i32) -> Result<Option<StatusRow>, StatusError> {
        Ok(find(&self.db, kind, id).await?)
    }
}
