//! Entity prelude.

pub use super::clients::Entity as Clients;
pub use super::contacts::Entity as Contacts;
pub use super::managers::Entity as Managers;
pub use super::payment_schedules::Entity as PaymentSchedules;
pub use super::payment_statuses::Entity as PaymentStatuses;
pub use super::product_statuses::Entity as ProductStatuses;
pub use super::product_types::Entity as ProductTypes;
pub use super::products::Entity as Products;
pub use super::role_permissions::Entity as RolePermissions;
pub use super::roles::Entity as Roles;
pub use super::transaction_statuses::Entity as TransactionStatuses;
pub use super::transaction_types::Entity as TransactionTypes;
pub use super::transactions::Entity as Transactions;
