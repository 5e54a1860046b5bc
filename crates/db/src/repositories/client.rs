//! Client repository: clients and their contact records.

use chrono::NaiveDate;
use mfo_shared::types::{ClientId, PageRequest};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, Func, SimpleExpr},
};
use tracing::info;

use crate::entities::{clients, contacts, products, sea_orm_active_enums::Gender};

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(ClientId),

    /// A required contact field is blank.
    #[error("Contact field '{0}' must not be empty")]
    MissingField(&'static str),

    /// Salary is negative.
    #[error("Salary cannot be negative")]
    NegativeSalary,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClientError> for mfo_shared::AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => Self::NotFound(err.to_string()),
            ClientError::MissingField(_) | ClientError::NegativeSalary => {
                Self::Validation(err.to_string())
            }
            ClientError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a client together with its contact record.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Passport series.
    pub passport_series: String,
    /// Passport number.
    pub passport_number: String,
    /// Monthly salary.
    pub salary: Option<Decimal>,
    /// Employer.
    pub work_place: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<Gender>,
}

/// Filter options for listing clients.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    /// Case-insensitive substring over name, phone, passport and work place.
    pub search: Option<String>,
    /// Exact gender.
    pub gender: Option<Gender>,
    /// Born on or after.
    pub birth_from: Option<NaiveDate>,
    /// Born on or before.
    pub birth_to: Option<NaiveDate>,
}

/// Client with its contact record.
#[derive(Debug, Clone)]
pub struct ClientWithContact {
    /// The client record.
    pub client: clients::Model,
    /// The contact record.
    pub contact: contacts::Model,
}

/// Client with contact and opened products.
#[derive(Debug, Clone)]
pub struct ClientDetails {
    /// Client and contact.
    pub client: ClientWithContact,
    /// Products in creation order.
    pub products: Vec<products::Model>,
}

/// Lower-cased `LIKE '%term%'` that behaves the same on Postgres and SQLite.
pub(crate) fn icontains(expr: impl Into<SimpleExpr>, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(expr.into())).like(pattern)
}

/// Builds the `%term%` pattern used by [`icontains`].
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term.trim().to_lowercase().replace('%', "").replace('_', "");
    format!("%{escaped}%")
}

/// Search condition over the contact columns, used by client and product listings.
pub(crate) fn contact_search(term: &str) -> Condition {
    let pattern = like_pattern(term);
    let col = |c: contacts::Column| Expr::col((contacts::Entity, c));
    let series = || SimpleExpr::from(col(contacts::Column::PassportSeries));
    let number = || SimpleExpr::from(col(contacts::Column::PassportNumber));

    Condition::any()
        .add(icontains(col(contacts::Column::Name), &pattern))
        .add(icontains(col(contacts::Column::Phone), &pattern))
        .add(icontains(series(), &pattern))
        .add(icontains(number(), &pattern))
        .add(icontains(
            Expr::cust_with_exprs("$1 || ' ' || $2", [series(), number()]),
            &pattern,
        ))
        .add(icontains(
            Expr::cust_with_exprs("$1 || $2", [series(), number()]),
            &pattern,
        ))
}

/// Client repository.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the contact and the client in one database transaction.
    pub async fn create(&self, input: CreateClientInput) -> Result<ClientWithContact, ClientError> {
        for (field, value) in [
            ("name", &input.name),
            ("phone", &input.phone),
            ("passport_series", &input.passport_series),
            ("passport_number", &input.passport_number),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::MissingField(field));
            }
        }
        if input.salary.is_some_and(|s| s < Decimal::ZERO) {
            return Err(ClientError::NegativeSalary);
        }

        let txn = self.db.begin().await?;

        let contact = contacts::ActiveModel {
            name: Set(input.name.trim().to_string()),
            phone: Set(input.phone.trim().to_string()),
            address: Set(input.address.trim().to_string()),
            passport_series: Set(input.passport_series.trim().to_string()),
            passport_number: Set(input.passport_number.trim().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let client = clients::ActiveModel {
            contact_id: Set(contact.id),
            salary: Set(input.salary.map(mfo_shared::types::round_money)),
            work_place: Set(input.work_place.filter(|w| !w.trim().is_empty())),
            birth_date: Set(input.birth_date),
            gender: Set(input.gender),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(client_id = client.id, contact_id = contact.id, "Client created");

        Ok(ClientWithContact { client, contact })
    }

    /// Finds a client with its contact.
    pub async fn find(&self, id: ClientId) -> Result<Option<ClientWithContact>, ClientError> {
        let row = clients::Entity::find_by_id(id.into_inner())
            .find_also_related(contacts::Entity)
            .one(&self.db)
            .await?;

        Ok(row.and_then(|(client, contact)| {
            contact.map(|contact| ClientWithContact { client, contact })
        }))
    }

    /// Finds a client with contact and products.
    pub async fn find_details(&self, id: ClientId) -> Result<ClientDetails, ClientError> {
        let client = self.find(id).await?.ok_or(ClientError::NotFound(id))?;

        let products = products::Entity::find()
            .filter(products::Column::ClientId.eq(id.into_inner()))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ClientDetails { client, products })
    }

    /// Lists clients matching the filter, newest first.
    ///
    /// Returns the page and the total number of matches.
    pub async fn list(
        &self,
        filter: &ClientFilter,
        page: PageRequest,
    ) -> Result<(Vec<ClientWithContact>, u64), ClientError> {
        let mut query = clients::Entity::find().find_also_related(contacts::Entity);

        if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
            let pattern = like_pattern(term);
            query = query.filter(
                contact_search(term).add(icontains(
                    Expr::col((clients::Entity, clients::Column::WorkPlace)),
                    &pattern,
                )),
            );
        }
        if let Some(gender) = filter.gender {
            query = query.filter(clients::Column::Gender.eq(gender));
        }
        if let Some(from) = filter.birth_from {
            query = query.filter(clients::Column::BirthDate.gte(from));
        }
        if let Some(to) = filter.birth_to {
            query = query.filter(clients::Column::BirthDate.lte(to));
        }

        let paginator = query
            .order_by_desc(clients::Column::Id)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_index()).await?;

        let clients = rows
            .into_iter()
            .filter_map(|(client, contact)| {
                contact.map(|contact| ClientWithContact { client, contact })
            })
            .collect();

        Ok((clients, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_strips_wildcards() {
        assert_eq!(like_pattern("  Ив%ан_ "), "%иван%");
        assert_eq!(like_pattern("4510"), "%4510%");
    }
}
