//! Product and transaction type catalog.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::entities::{product_types, sea_orm_active_enums::ProductBehavior, transaction_types};

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Name is blank.
    #[error("Name must not be empty")]
    EmptyName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CatalogError> for mfo_shared::AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EmptyName => Self::Validation(err.to_string()),
            CatalogError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

fn clean_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    Ok(name.to_string())
}

/// Catalog repository.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists product types.
    pub async fn list_product_types(&self) -> Result<Vec<product_types::Model>, CatalogError> {
        Ok(product_types::Entity::find()
            .order_by_asc(product_types::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Finds a product type by id.
    pub async fn find_product_type(
        &self,
        id: i32,
    ) -> Result<Option<product_types::Model>, CatalogError> {
        Ok(product_types::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates a product type.
    pub async fn create_product_type(
        &self,
        name: &str,
        behavior: ProductBehavior,
    ) -> Result<product_types::Model, CatalogError> {
        let model = product_types::ActiveModel {
            name: Set(clean_name(name)?),
            behavior: Set(behavior),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(product_type_id = model.id, name = %model.name, ?behavior, "Product type created");
        Ok(model)
    }

    /// Lists transaction types.
    pub async fn list_transaction_types(
        &self,
    ) -> Result<Vec<transaction_types::Model>, CatalogError> {
        Ok(transaction_types::Entity::find()
            .order_by_asc(transaction_types::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Creates a transaction type.
    pub async fn create_transaction_type(
        &self,
        name: &str,
    ) -> Result<transaction_types::Model, CatalogError> {
        let model = transaction_types::ActiveModel {
            name: Set(clean_name(name)?),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(transaction_type_id = model.id, name = %model.name, "Transaction type created");
        Ok(model)
    }
}
