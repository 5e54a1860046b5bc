//! Manager repository: staff accounts, roles and their capabilities.

use chrono::Utc;
use mfo_core::auth::{Capabilities, PasswordError, hash_password, verify_password};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{info, warn};

use crate::entities::{managers, role_permissions, roles};

/// Error types for manager operations.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// Unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Account is disabled.
    #[error("Account is inactive")]
    Inactive,

    /// Username already taken.
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ManagerError> for mfo_shared::AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::InvalidCredentials | ManagerError::Inactive => {
                Self::Unauthorized(err.to_string())
            }
            ManagerError::UsernameTaken(_) => Self::Conflict(err.to_string()),
            ManagerError::Password(e) => Self::Internal(e.to_string()),
            ManagerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a manager account.
#[derive(Debug, Clone)]
pub struct CreateManagerInput {
    /// Login name.
    pub username: String,
    /// Plain-text password; stored as an argon2 hash.
    pub password: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Role granting capabilities.
    pub role_id: Option<i32>,
    /// Holds every capability.
    pub is_superuser: bool,
}

/// A manager who passed the password check.
#[derive(Debug, Clone)]
pub struct AuthenticatedManager {
    /// The manager record.
    pub manager: managers::Model,
    /// Assigned role.
    pub role: Option<roles::Model>,
    /// Resolved capabilities.
    pub capabilities: Capabilities,
}

/// Manager repository.
#[derive(Debug, Clone)]
pub struct ManagerRepository {
    db: DatabaseConnection,
}

impl ManagerRepository {
    /// Creates a new manager repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a manager by login name.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<managers::Model>, DbErr> {
        managers::Entity::find()
            .filter(managers::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a manager by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<managers::Model>, DbErr> {
        managers::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a manager account with a hashed password.
    pub async fn create(&self, input: CreateManagerInput) -> Result<managers::Model, ManagerError> {
        let username = input.username.trim().to_string();
        if self.find_by_username(&username).await?.is_some() {
            return Err(ManagerError::UsernameTaken(username));
        }

        let password_hash = hash_password(&input.password)?;
        let manager = managers::ActiveModel {
            username: Set(username),
            password_hash: Set(password_hash),
            full_name: Set(input.full_name),
            phone: Set(input.phone),
            role_id: Set(input.role_id),
            is_superuser: Set(input.is_superuser),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(manager_id = manager.id, username = %manager.username, "Manager created");
        Ok(manager)
    }

    /// Creates a role with the given capability codenames.
    pub async fn create_role(&self, name: &str, codenames: &[&str]) -> Result<roles::Model, DbErr> {
        let txn = self.db.begin().await?;

        let role = roles::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for codename in codenames {
            role_permissions::ActiveModel {
                role_id: Set(role.id),
                codename: Set((*codename).to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(role)
    }

    /// Resolves the capabilities of a manager from their role.
    pub async fn capabilities(&self, manager: &managers::Model) -> Result<Capabilities, DbErr> {
        let codenames = match manager.role_id {
            Some(role_id) => role_permissions::Entity::find()
                .filter(role_permissions::Column::RoleId.eq(role_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|p| p.codename)
                .collect(),
            None => Vec::new(),
        };
        Ok(Capabilities::new(manager.is_superuser, codenames))
    }

    /// Checks a username and password pair.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedManager, ManagerError> {
        let Some(manager) = self.find_by_username(username.trim()).await? else {
            warn!(username = %username, "Login attempt for unknown manager");
            return Err(ManagerError::InvalidCredentials);
        };

        if !manager.is_active {
            warn!(manager_id = manager.id, "Login attempt for inactive manager");
            return Err(ManagerError::Inactive);
        }

        if !verify_password(password, &manager.password_hash)? {
            warn!(manager_id = manager.id, "Login attempt with wrong password");
            return Err(ManagerError::InvalidCredentials);
        }

        let role = match manager.role_id {
            Some(role_id) => roles::Entity::find_by_id(role_id).one(&self.db).await?,
            None => None,
        };
        let capabilities = self.capabilities(&manager).await?;

        Ok(AuthenticatedManager {
            manager,
            role,
            capabilities,
        })
    }
}
