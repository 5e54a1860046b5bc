//! Staff capabilities and password hashing.
//!
//! A manager's capabilities come from the permission codenames attached to
//! their role; superusers hold every capability.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use std::collections::BTreeSet;

/// Capabilities checked by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May approve or reject pending transactions.
    ApproveTransaction,
}

impl Capability {
    /// Codename stored in `role_permissions.codename`.
    #[must_use]
    pub const fn codename(self) -> &'static str {
        match self {
            Self::ApproveTransaction => "approve_transaction",
        }
    }

    /// Human readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ApproveTransaction => "Может одобрять транзакции",
        }
    }
}

/// Resolved capability set of one manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    superuser: bool,
    codenames: BTreeSet<String>,
}

impl Capabilities {
    /// Builds a set from role codenames.
    pub fn new(superuser: bool, codenames: impl IntoIterator<Item = String>) -> Self {
        Self {
            superuser,
            codenames: codenames.into_iter().collect(),
        }
    }

    /// A set that grants nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A set that grants everything.
    #[must_use]
    pub fn superuser() -> Self {
        Self {
            superuser: true,
            codenames: BTreeSet::new(),
        }
    }

    /// Whether the set grants `capability`.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.superuser || self.codenames.contains(capability.codename())
    }

    /// Whether this is a superuser's set.
    #[must_use]
    pub const fn is_superuser(&self) -> bool {
        self.superuser
    }

    /// Sorted codenames granted through the role.
    #[must_use]
    pub fn codenames(&self) -> Vec<String> {
        self.codenames.iter().cloned().collect()
    }
}
