//! Authentication types for staff login and JWT claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ManagerId;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (manager ID).
    pub sub: i32,
    /// Login name.
    pub username: String,
    /// Superusers hold every capability.
    #[serde(default)]
    pub superuser: bool,
    /// Capability codenames granted through the manager's role.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a manager.
    #[must_use]
    pub fn new(
        manager_id: ManagerId,
        username: &str,
        superuser: bool,
        permissions: Vec<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: manager_id.into_inner(),
            username: username.to_string(),
            superuser,
            permissions,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the manager ID from claims.
    #[must_use]
    pub const fn manager_id(&self) -> ManagerId {
        ManagerId::new(self.sub)
    }

    /// Whether the claims grant the named capability.
    #[must_use]
    pub fn has_permission(&self, codename: &str) -> bool {
        self.superuser || self.permissions.iter().any(|p| p == codename)
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Manager login name.
    pub username: String,
    /// Manager password.
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
    /// Authenticated manager.
    pub manager: ManagerInfo,
}

/// Manager info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct ManagerInfo {
    /// Manager ID.
    pub id: ManagerId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Role name, if assigned.
    pub role: Option<String>,
    /// Superuser flag.
    pub is_superuser: bool,
    /// Capability codenames.
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_permission() {
        let expires = Utc::now();
        let claims = Claims::new(
            ManagerId::new(3),
            "petrov",
            false,
            vec!["approve_transaction".into()],
            expires,
        );
        assert!(claims.has_permission("approve_transaction"));
        assert!(!claims.has_permission("delete_product"));
        assert_eq!(claims.manager_id().into_inner(), 3);
    }

    #[test]
    fn test_superuser_has_every_permission() {
        let claims = Claims::new(ManagerId::new(1), "root", true, Vec::new(), Utc::now());
        assert!(claims.has_permission("approve_transaction"));
    }

    #[test]
    fn test_claims_without_permissions_field_deserialize() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":5,"username":"a","iat":0,"exp":1}"#).unwrap();
        assert!(!claims.superuser);
        assert!(claims.permissions.is_empty());
    }
}
