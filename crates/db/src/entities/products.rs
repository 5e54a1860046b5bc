//! `SeaORM` Entity for products table.
//!
//! Only `status_id` changes after creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub product_type_id: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub interest_rate: Decimal,
    pub duration: i32,
    pub status_id: i32,
    pub created_at: DateTimeUtc,
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
        belongs_to = "super::product_types::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_types::Column::Id"
    )]
    ProductTypes,
    #[sea_orm(
        belongs_to = "super::product_statuses::Entity",
        from = "Column::StatusId",
        to = "super::product_statuses::Column::Id"
    )]
    ProductStatuses,
    #[sea_orm(has_many = "super::payment_schedules::Entity")]
    PaymentSchedules,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::product_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductTypes.def()
    }
}

impl Related<super::product_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStatuses.def()
    }
}

impl Related<super::payment_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentSchedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
