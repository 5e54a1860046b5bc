//! Integration tests for product opening and schedule generation.

mod common;

use common::{date, open_product, opened_at, seed_client, seed_product_type, setup_db};
use mfo_core::schedule::{MAX_DURATION_MONTHS, ScheduleError};
use mfo_db::entities::sea_orm_active_enums::ProductBehavior;
use mfo_db::entities::{payment_schedules, products};
use mfo_db::repositories::{CreateProductInput, ProductError, ProductFilter};
use mfo_db::{ProductRepository, StatusRepository};
use mfo_core::status::{PaymentStatusName, ProductStatusName, StatusKind};
use mfo_shared::AppError;
use mfo_shared::types::{PageRequest, ProductId, round_money};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn test_credit_product_gets_equal_installments() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;

    let created = open_product(&db, client_id, ProductBehavior::Credit, dec!(120000), dec!(12), 12).await;

    assert_eq!(created.schedule.len(), 12);
    assert!(created
        .schedule
        .iter()
        .all(|e| round_money(e.entry.amount) == dec!(11200)));
    assert!(created
        .schedule
        .iter()
        .all(|e| e.status.as_deref() == Some(PaymentStatusName::Scheduled.as_str())));
    assert_eq!(created.schedule[0].entry.scheduled_date, date(2024, 1, 31));
    assert_eq!(created.schedule[11].entry.scheduled_date, date(2024, 12, 26));
    assert!(created.schedule.iter().all(|e| e.entry.transaction_id.is_none()));
}

#[tokio::test]
async fn test_deposit_product_returns_principal_last() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Petrova Anna").await;

    let created = open_product(&db, client_id, ProductBehavior::Deposit, dec!(100000), dec!(10), 6).await;

    let amounts: Vec<_> = created
        .schedule
        .iter()
        .map(|e| round_money(e.entry.amount))
        .collect();
    assert_eq!(amounts.len(), 6);
    assert!(amounts[..5].iter().all(|a| *a == dec!(833.33)));
    assert_eq!(amounts[5], dec!(100833.33));
}

#[tokio::test]
async fn test_default_status_is_active() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Sidorov Petr").await;

    let created = open_product(&db, client_id, ProductBehavior::Credit, dec!(5000), dec!(20), 3).await;

    let status = StatusRepository::new(db.clone())
        .find(StatusKind::Product, created.product.status_id)
        .await
        .unwrap()
        .expect("status row should exist");
    assert_eq!(status.name, ProductStatusName::Active.as_str());
}

#[tokio::test]
async fn test_invalid_duration_persists_nothing() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;
    let product_type_id = seed_product_type(&db, ProductBehavior::Credit).await;

    let err = ProductRepository::new(db.clone())
        .create_with_schedule(
            CreateProductInput {
                client_id,
                product_type_id,
                amount: dec!(1000),
                interest_rate: dec!(10),
                duration: 0,
                status_id: None,
            },
            opened_at(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProductError::Schedule(ScheduleError::InvalidDuration(0))
    ));
    assert_eq!(products::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(payment_schedules::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_longest_term_is_inserted_in_full() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;

    let created = open_product(
        &db,
        client_id,
        ProductBehavior::Credit,
        dec!(1000),
        dec!(10),
        MAX_DURATION_MONTHS,
    )
    .await;

    assert_eq!(created.schedule.len(), 600);
    assert_eq!(payment_schedules::Entity::find().count(&db).await.unwrap(), 600);
}

#[tokio::test]
async fn test_too_long_term_is_a_validation_error() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;
    let product_type_id = seed_product_type(&db, ProductBehavior::Credit).await;

    let err = ProductRepository::new(db.clone())
        .create_with_schedule(
            CreateProductInput {
                client_id,
                product_type_id,
                amount: dec!(1000),
                interest_rate: dec!(10),
                duration: 6000,
                status_id: None,
            },
            opened_at(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProductError::Schedule(ScheduleError::DurationTooLong { duration: 6000, .. })
    ));
    assert_eq!(AppError::from(err).status_code(), 400);
    assert_eq!(products::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_client_rolls_back() {
    let db = setup_db().await;
    let product_type_id = seed_product_type(&db, ProductBehavior::Deposit).await;

    let err = ProductRepository::new(db.clone())
        .create_with_schedule(
            CreateProductInput {
                client_id: 404,
                product_type_id,
                amount: dec!(1000),
                interest_rate: dec!(10),
                duration: 3,
                status_id: None,
            },
            opened_at(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::ClientNotFound(404)));
    assert_eq!(products::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_product_type() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;

    let err = ProductRepository::new(db.clone())
        .create_with_schedule(
            CreateProductInput {
                client_id,
                product_type_id: 99,
                amount: dec!(1000),
                interest_rate: dec!(10),
                duration: 3,
                status_id: None,
            },
            opened_at(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::ProductTypeNotFound(99)));
}

#[tokio::test]
async fn test_find_details_and_update_status() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;
    let created = open_product(&db, client_id, ProductBehavior::Credit, dec!(6000), dec!(12), 6).await;
    let repo = ProductRepository::new(db.clone());
    let id = ProductId::new(created.product.id);

    let details = repo.find_details(id).await.unwrap();
    assert_eq!(details.schedule.len(), 6);
    assert_eq!(details.product_type.behavior, ProductBehavior::Credit);
    assert_eq!(
        details.client.map(|c| c.contact.name),
        Some("Ivanov Ivan".to_string())
    );

    let closed = StatusRepository::new(db.clone())
        .get_or_create(StatusKind::Product, ProductStatusName::Closed.as_str())
        .await
        .unwrap();
    let updated = repo.update_status(id, closed.id).await.unwrap();
    assert_eq!(updated.status_id, closed.id);
    assert_eq!(updated.duration, 6);

    assert!(matches!(
        repo.update_status(id, 999).await,
        Err(ProductError::StatusNotFound(999))
    ));
    assert!(matches!(
        repo.find_details(ProductId::new(999)).await,
        Err(ProductError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_searches_by_client_and_id() {
    let db = setup_db().await;
    let ivanov = seed_client(&db, "Ivanov Ivan").await;
    let petrova = seed_client(&db, "Petrova Anna").await;
    let first = open_product(&db, ivanov, ProductBehavior::Credit, dec!(1000), dec!(10), 2).await;
    open_product(&db, petrova, ProductBehavior::Deposit, dec!(2000), dec!(10), 2).await;
    let repo = ProductRepository::new(db.clone());

    let (rows, total) = repo
        .list(
            &ProductFilter {
                search: Some("petrova".into()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].client_id, petrova);

    let (rows, _) = repo
        .list(
            &ProductFilter {
                search: Some(first.product.id.to_string()),
                product_type_id: Some(first.product.product_type_id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, first.product.id);

    let (rows, total) = repo
        .list(&ProductFilter::default(), PageRequest::new(Some(1), Some(1)))
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows.len(), 1);
}
