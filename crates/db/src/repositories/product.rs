//! Product repository: opening products together with their payment schedule.

use chrono::{DateTime, Utc};
use mfo_core::schedule::{ScheduleError, ScheduleGenerator, ScheduleTerms};
use mfo_core::status::{PaymentStatusName, ProductStatusName, StatusKind};
use mfo_shared::types::{PageRequest, ProductId, round_money};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::client::{ClientWithContact, contact_search};
use super::schedule::{self, ScheduleEntry};
use super::status::{self as registry, StatusRow};
use crate::entities::{clients, contacts, payment_schedules, product_types, products};

/// Upper bound of a `decimal(12,2)` column.
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);
/// Upper bound of a `decimal(5,2)` column.
const MAX_RATE: Decimal = Decimal::from_parts(99_999, 0, 0, false, 2);
/// Rows per multi-row insert, well under the bind-parameter limits.
const INSERT_CHUNK: usize = 100;

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Product not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Referenced client does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(i32),

    /// Referenced product type does not exist.
    #[error("Product type not found: {0}")]
    ProductTypeNotFound(i32),

    /// Referenced product status does not exist.
    #[error("Product status not found: {0}")]
    StatusNotFound(i32),

    /// Amount or rate does not fit its column.
    #[error("{field} exceeds the maximum of {max}")]
    OutOfRange {
        /// Offending input field.
        field: &'static str,
        /// Largest accepted value.
        max: Decimal,
    },

    /// Terms cannot produce a schedule.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ProductError> for mfo_shared::AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => Self::NotFound(err.to_string()),
            ProductError::ClientNotFound(_)
            | ProductError::ProductTypeNotFound(_)
            | ProductError::StatusNotFound(_)
            | ProductError::OutOfRange { .. } => Self::Validation(err.to_string()),
            ProductError::Schedule(e) => e.into(),
            ProductError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for opening a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Owning client.
    pub client_id: i32,
    /// Product type; decides deposit or credit behavior.
    pub product_type_id: i32,
    /// Principal.
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Term in months.
    pub duration: i32,
    /// Initial status; "Активен" when absent.
    pub status_id: Option<i32>,
}

/// Filter options for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Product id, client id, client name or phone, or passport.
    pub search: Option<String>,
    /// Exact product type.
    pub product_type_id: Option<i32>,
    /// Exact status.
    pub status_id: Option<i32>,
}

/// Product with its schedule as created.
#[derive(Debug, Clone)]
pub struct ProductWithSchedule {
    /// The product record.
    pub product: products::Model,
    /// Schedule entries in due order.
    pub schedule: Vec<ScheduleEntry>,
}

/// Product with everything a detail view shows.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    /// The product record.
    pub product: products::Model,
    /// Its type.
    pub product_type: product_types::Model,
    /// Its current status.
    pub status: Option<StatusRow>,
    /// Owning client.
    pub client: Option<ClientWithContact>,
    /// Schedule entries in due order.
    pub schedule: Vec<ScheduleEntry>,
}

/// Product repository.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a product and materializes its schedule in one database transaction.
    ///
    /// Entries are due every 30 days counted from `now`'s date and start in
    /// status "Назначен". Any failure leaves neither the product nor a
    /// partial schedule behind.
    pub async fn create_with_schedule(
        &self,
        input: CreateProductInput,
        now: DateTime<Utc>,
    ) -> Result<ProductWithSchedule, ProductError> {
        let amount = round_money(input.amount);
        let interest_rate = round_money(input.interest_rate);
        if amount > MAX_AMOUNT {
            return Err(ProductError::OutOfRange {
                field: "amount",
                max: MAX_AMOUNT,
            });
        }
        if interest_rate > MAX_RATE {
            return Err(ProductError::OutOfRange {
                field: "interest_rate",
                max: MAX_RATE,
            });
        }

        let txn = self.db.begin().await?;

        let product_type = product_types::Entity::find_by_id(input.product_type_id)
            .one(&txn)
            .await?
            .ok_or(ProductError::ProductTypeNotFound(input.product_type_id))?;

        let terms = ScheduleTerms {
            amount,
            interest_rate,
            duration: input.duration,
            behavior: product_type.behavior.into(),
        };
        let installments = ScheduleGenerator::generate(&terms, now.date_naive())?;

        if clients::Entity::find_by_id(input.client_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ProductError::ClientNotFound(input.client_id));
        }

        let status_id = match input.status_id {
            Some(id) => registry::find(&txn, StatusKind::Product, id)
                .await?
                .ok_or(ProductError::StatusNotFound(id))?
                .id,
            None => registry::product_status_id(&txn, ProductStatusName::Active).await?,
        };

        let product = products::ActiveModel {
            client_id: Set(input.client_id),
            product_type_id: Set(product_type.id),
            amount: Set(amount),
            interest_rate: Set(interest_rate),
            duration: Set(input.duration),
            status_id: Set(status_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let scheduled = registry::payment_status_id(&txn, PaymentStatusName::Scheduled).await?;
        for chunk in installments.chunks(INSERT_CHUNK) {
            let rows = chunk.iter().map(|p| payment_schedules::ActiveModel {
                product_id: Set(product.id),
                amount: Set(p.amount),
                scheduled_date: Set(p.scheduled_date),
                actual_date: Set(None),
                status_id: Set(Some(scheduled)),
                transaction_id: Set(None),
                ..Default::default()
            });
            payment_schedules::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        let schedule = schedule::for_product(&txn, product.id).await?;

        txn.commit().await?;

        info!(
            product_id = product.id,
            client_id = product.client_id,
            behavior = %terms.behavior,
            installments = schedule.len(),
            "Product opened with schedule"
        );

        Ok(ProductWithSchedule { product, schedule })
    }

    /// Finds a product with type, status, client and schedule.
    pub async fn find_details(&self, id: ProductId) -> Result<ProductDetails, ProductError> {
        let (product, product_type) = products::Entity::find_by_id(id.into_inner())
            .find_also_related(product_types::Entity)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        let product_type =
            product_type.ok_or(ProductError::ProductTypeNotFound(product.product_type_id))?;

        let status = registry::find(&self.db, StatusKind::Product, product.status_id).await?;

        let client = clients::Entity::find_by_id(product.client_id)
            .find_also_related(contacts::Entity)
            .one(&self.db)
            .await?
            .and_then(|(client, contact)| {
                contact.map(|contact| ClientWithContact { client, contact })
            });

        let schedule = schedule::for_product(&self.db, product.id).await?;

        Ok(ProductDetails {
            product,
            product_type,
            status,
            client,
            schedule,
        })
    }

    /// Lists products matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<(Vec<products::Model>, u64), ProductError> {
        let mut query = products::Entity::find()
            .join(JoinType::InnerJoin, products::Relation::Clients.def())
            .join(JoinType::InnerJoin, clients::Relation::Contacts.def());

        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let mut condition = Condition::any().add(contact_search(term));
            if let Ok(id) = term.parse::<i32>() {
                condition = condition
                    .add(products::Column::Id.eq(id))
                    .add(products::Column::ClientId.eq(id));
            }
            query = query.filter(condition);
        }
        if let Some(product_type_id) = filter.product_type_id {
            query = query.filter(products::Column::ProductTypeId.eq(product_type_id));
        }
        if let Some(status_id) = filter.status_id {
            query = query.filter(products::Column::StatusId.eq(status_id));
        }

        let paginator = query
            .order_by_desc(products::Column::Id)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_index()).await?;

        Ok((rows, total))
    }

    /// Moves a product to another status.
    ///
    /// Status is the only product attribute that changes after creation.
    pub async fn update_status(
        &self,
        id: ProductId,
        status_id: i32,
    ) -> Result<products::Model, ProductError> {
        let product = products::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if registry::find(&self.db, StatusKind::Product, status_id)
            .await?
            .is_none()
        {
            return Err(ProductError::StatusNotFound(status_id));
        }

        let previous = product.status_id;
        let mut active: products::ActiveModel = product.into();
        active.status_id = Set(status_id);
        let updated = active.update(&self.db).await?;

        debug!(product_id = updated.id, previous, status_id, "Product status changed");
        Ok(updated)
    }
}
