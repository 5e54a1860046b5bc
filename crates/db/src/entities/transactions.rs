//! `SeaORM` Entity for transactions table.
//!
//! `approved` is NULL while pending, then true or false once decided.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub product_id: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub transaction_type_id: Option<i32>,
    pub date: DateTimeUtc,
    pub approved: Option<bool>,
    pub approved_by: Option<i32>,
    pub status_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id",
        on_delete = "Cascade"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Products,
    #[sea_orm(
        belongs_to = "super::transaction_types::Entity",
        from = "Column::TransactionTypeId",
        to = "super::transaction_types::Column::Id",
        on_delete = "SetNull"
    )]
    TransactionTypes,
    #[sea_orm(
        belongs_to = "super::managers::Entity",
        from = "Column::ApprovedBy",
        to = "super::managers::Column::Id",
        on_delete = "SetNull"
    )]
    Managers,
    #[sea_orm(
        belongs_to = "super::transaction_statuses::Entity",
        from = "Column::StatusId",
        to = "super::transaction_statuses::Column::Id",
        on_delete = "SetNull"
    )]
    TransactionStatuses,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::transaction_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionTypes.def()
    }
}

impl Related<super::managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Managers.def()
    }
}

impl Related<super::transaction_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionStatuses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
