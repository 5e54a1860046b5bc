//! Typed IDs for type-safe entity references.
//!
//! Rows are keyed by serial columns, so every ID wraps an `i32`. The
//! wrapper keeps a `ClientId` from being passed where a `ProductId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(ClientId, "Unique identifier for a client.");
typed_id!(ContactId, "Unique identifier for a contact card.");
typed_id!(ManagerId, "Unique identifier for a staff manager.");
typed_id!(RoleId, "Unique identifier for a manager role.");
typed_id!(ProductId, "Unique identifier for a credit or deposit product.");
typed_id!(ProductTypeId, "Unique identifier for a product type.");
typed_id!(PaymentScheduleId, "Unique identifier for a scheduled payment.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(TransactionTypeId, "Unique identifier for a transaction type.");
typed_id!(StatusId, "Unique identifier for a row in any status table.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = ProductId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42 ".parse::<ProductId>().unwrap(), id);
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ClientId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: ClientId = serde_json::from_str("9").unwrap();
        assert_eq!(i32::from(back), 9);
    }
}
