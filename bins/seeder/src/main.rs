//! Database seeder for the MFO back office.
//!
//! Seeds the status tables, the product and transaction catalogs, the
//! senior manager role and an administrator account. Every step checks for
//! existing rows first, so the seeder can be re-run against a live database.
//!
//! Usage: cargo run --bin seeder
//!
//! `SEED_ADMIN_USERNAME` and `SEED_ADMIN_PASSWORD` override the default
//! `admin` / `admin` credentials.

use anyhow::Context;
use mfo_core::auth::Capability;
use mfo_core::status::{PaymentStatusName, ProductStatusName, StatusKind, TransactionStatusName};
use mfo_db::entities::{product_types, roles, sea_orm_active_enums::ProductBehavior, transaction_types};
use mfo_db::repositories::CreateManagerInput;
use mfo_db::{CatalogRepository, ManagerRepository, StatusRepository};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Role allowed to approve transactions.
const SENIOR_MANAGER_ROLE: &str = "Старший менеджер";

const PRODUCT_TYPES: [(&str, ProductBehavior); 2] = [
    ("Депозит", ProductBehavior::Deposit),
    ("Кредит", ProductBehavior::Credit),
];

const TRANSACTION_TYPES: [&str; 3] = ["Взнос", "Выдача", "Погашение"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = mfo_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding statuses...");
    seed_statuses(&db).await?;

    println!("Seeding product types...");
    seed_product_types(&db).await?;

    println!("Seeding transaction types...");
    seed_transaction_types(&db).await?;

    println!("Seeding roles...");
    let role_id = seed_senior_role(&db).await?;

    println!("Seeding administrator...");
    seed_admin(&db, role_id).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_statuses(db: &DatabaseConnection) -> anyhow::Result<()> {
    let statuses = StatusRepository::new(db.clone());

    let names = [
        (StatusKind::Payment, PaymentStatusName::Scheduled.as_str()),
        (StatusKind::Payment, PaymentStatusName::Paid.as_str()),
        (StatusKind::Payment, PaymentStatusName::Overdue.as_str()),
        (StatusKind::Transaction, TransactionStatusName::Cancelled.as_str()),
        (StatusKind::Product, ProductStatusName::Active.as_str()),
        (StatusKind::Product, ProductStatusName::Closed.as_str()),
    ];
    for (kind, name) in names {
        let row = statuses.get_or_create(kind, name).await?;
        println!("  {kind:?}: {} (id {})", row.name, row.id);
    }
    Ok(())
}

async fn seed_product_types(db: &DatabaseConnection) -> anyhow::Result<()> {
    let catalog = CatalogRepository::new(db.clone());

    for (name, behavior) in PRODUCT_TYPES {
        let existing = product_types::Entity::find()
            .filter(product_types::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_some() {
            println!("  Product type {name} already exists, skipping...");
            continue;
        }
        catalog.create_product_type(name, behavior).await?;
        println!("  Created product type {name}");
    }
    Ok(())
}

async fn seed_transaction_types(db: &DatabaseConnection) -> anyhow::Result<()> {
    let catalog = CatalogRepository::new(db.clone());

    for name in TRANSACTION_TYPES {
        let existing = transaction_types::Entity::find()
            .filter(transaction_types::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_some() {
            println!("  Transaction type {name} already exists, skipping...");
            continue;
        }
        catalog.create_transaction_type(name).await?;
        println!("  Created transaction type {name}");
    }
    Ok(())
}

async fn seed_senior_role(db: &DatabaseConnection) -> anyhow::Result<i32> {
    if let Some(role) = roles::Entity::find()
        .filter(roles::Column::Name.eq(SENIOR_MANAGER_ROLE))
        .one(db)
        .await?
    {
        println!("  Role {SENIOR_MANAGER_ROLE} already exists, skipping...");
        return Ok(role.id);
    }

    let role = ManagerRepository::new(db.clone())
        .create_role(
            SENIOR_MANAGER_ROLE,
            &[Capability::ApproveTransaction.codename()],
        )
        .await?;
    println!(
        "  Created role {SENIOR_MANAGER_ROLE} ({})",
        Capability::ApproveTransaction.description()
    );
    Ok(role.id)
}

async fn seed_admin(db: &DatabaseConnection, role_id: i32) -> anyhow::Result<()> {
    let username = std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    let managers = ManagerRepository::new(db.clone());

    if managers.find_by_username(&username).await?.is_some() {
        println!("  Manager {username} already exists, skipping...");
        return Ok(());
    }

    let manager = managers
        .create(CreateManagerInput {
            username: username.clone(),
            password,
            full_name: Some("Администратор".to_string()),
            phone: None,
            role_id: Some(role_id),
            is_superuser: true,
        })
        .await?;
    println!("  Created superuser {username} (id {})", manager.id);
    Ok(())
}
