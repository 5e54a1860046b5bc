//! String-backed enums stored in varchar columns.

use mfo_core::schedule::ProductBehavior as CoreBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How a product type moves money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ProductBehavior {
    /// Deposit.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Credit.
    #[sea_orm(string_value = "credit")]
    Credit,
}

impl From<ProductBehavior> for CoreBehavior {
    fn from(value: ProductBehavior) -> Self {
        match value {
            ProductBehavior::Deposit => Self::Deposit,
            ProductBehavior::Credit => Self::Credit,
        }
    }
}

impl From<CoreBehavior> for ProductBehavior {
    fn from(value: CoreBehavior) -> Self {
        match value {
            CoreBehavior::Deposit => Self::Deposit,
            CoreBehavior::Credit => Self::Credit,
        }
    }
}

/// Client gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Gender {
    /// Male.
    #[sea_orm(string_value = "M")]
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[sea_orm(string_value = "F")]
    #[serde(rename = "F")]
    Female,
}
