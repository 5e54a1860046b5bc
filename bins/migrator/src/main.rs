//! Schema migration runner.
//!
//! Usage:
//!   migrator up      - apply pending migrations
//!   migrator down    - roll back the last migration
//!   migrator status  - list applied and pending migrations
//!   migrator fresh   - drop every table and migrate from scratch
//!
//! The target database is read from `DATABASE_URL`.

use mfo_db::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
