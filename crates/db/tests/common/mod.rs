//! Shared fixtures for repository tests.
//!
//! Every test gets its own in-memory SQLite database with the real
//! migrations applied.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mfo_db::entities::sea_orm_active_enums::{Gender, ProductBehavior};
use mfo_db::migration::MigratorTrait;
use mfo_db::repositories::{
    CreateClientInput, CreateManagerInput, CreateProductInput, ProductWithSchedule,
};
use mfo_db::{CatalogRepository, ClientRepository, ManagerRepository, Migrator, ProductRepository};
use mfo_shared::types::ManagerId;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn client_input(name: &str) -> CreateClientInput {
    CreateClientInput {
        name: name.to_string(),
        phone: "+79001234567".to_string(),
        address: "Moscow, Tverskaya 1".to_string(),
        passport_series: "4510".to_string(),
        passport_number: "123456".to_string(),
        salary: None,
        work_place: Some("Gazprom".to_string()),
        birth_date: Some(date(1985, 5, 20)),
        gender: Some(Gender::Male),
    }
}

pub async fn seed_client(db: &DatabaseConnection, name: &str) -> i32 {
    ClientRepository::new(db.clone())
        .create(client_input(name))
        .await
        .expect("Failed to create client")
        .client
        .id
}

pub async fn seed_product_type(db: &DatabaseConnection, behavior: ProductBehavior) -> i32 {
    let name = match behavior {
        ProductBehavior::Credit => "Потребительский кредит",
        ProductBehavior::Deposit => "Срочный вклад",
    };
    CatalogRepository::new(db.clone())
        .create_product_type(name, behavior)
        .await
        .expect("Failed to create product type")
        .id
}

pub async fn open_product(
    db: &DatabaseConnection,
    client_id: i32,
    behavior: ProductBehavior,
    amount: Decimal,
    rate: Decimal,
    duration: i32,
) -> ProductWithSchedule {
    let product_type_id = seed_product_type(db, behavior).await;
    ProductRepository::new(db.clone())
        .create_with_schedule(
            CreateProductInput {
                client_id,
                product_type_id,
                amount,
                interest_rate: rate,
                duration,
                status_id: None,
            },
            opened_at(),
        )
        .await
        .expect("Failed to open product")
}

/// Creates an active manager; a role is attached when `codenames` is non-empty.
pub async fn seed_manager(
    db: &DatabaseConnection,
    username: &str,
    codenames: &[&str],
    is_superuser: bool,
) -> ManagerId {
    let managers = ManagerRepository::new(db.clone());
    let role_id = if codenames.is_empty() {
        None
    } else {
        let role = managers
            .create_role(&format!("{username} role"), codenames)
            .await
            .expect("Failed to create role");
        Some(role.id)
    };
    let manager = managers
        .create(CreateManagerInput {
            username: username.to_string(),
            password: "secret".to_string(),
            full_name: None,
            phone: None,
            role_id,
            is_superuser,
        })
        .await
        .expect("Failed to create manager");
    ManagerId::new(manager.id)
}
