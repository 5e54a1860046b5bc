//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod catalog;
pub mod client;
pub mod manager;
pub mod product;
pub mod report;
pub mod schedule;
pub mod status;
pub mod transaction;
pub mod workflow;

pub use catalog::{CatalogError, CatalogRepository};
pub use client::{
    ClientDetails, ClientError, ClientFilter, ClientRepository, ClientWithContact,
    CreateClientInput,
};
pub use manager::{AuthenticatedManager, CreateManagerInput, ManagerError, ManagerRepository};
pub use product::{
    CreateProductInput, ProductDetails, ProductError, ProductFilter, ProductRepository,
    ProductWithSchedule,
};
pub use report::{ReportDataError, ReportRepository};
pub use schedule::{ScheduleEntry, ScheduleFilter, ScheduleRepository};
pub use status::{MAX_STATUS_NAME_LEN, StatusError, StatusRepository, StatusRow};
pub use transaction::{
    CreateTransactionInput, CreatedTransaction, TransactionError, TransactionFilter,
    TransactionRepository,
};
pub use workflow::WorkflowRepository;
