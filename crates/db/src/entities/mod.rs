//! `SeaORM` entity definitions.

pub mod prelude;

pub mod clients;
pub mod contacts;
pub mod managers;
pub mod payment_schedules;
pub mod payment_statuses;
pub mod product_statuses;
pub mod product_types;
pub mod products;
pub mod role_permissions;
pub mod roles;
pub mod sea_orm_active_enums;
pub mod transaction_statuses;
pub mod transaction_types;
pub mod transactions;
