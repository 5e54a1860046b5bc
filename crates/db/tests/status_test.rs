//! Integration tests for the status registry.

mod common;

use common::setup_db;
use mfo_core::status::{PaymentStatusName, StatusKind};
use mfo_db::repositories::{MAX_STATUS_NAME_LEN, StatusError};
use mfo_db::repositories::status::payment_status_id;
use mfo_db::StatusRepository;
use mfo_shared::AppError;

#[tokio::test]
async fn test_get_or_create_is_idempotent() {
    let db = setup_db().await;
    let repo = StatusRepository::new(db.clone());

    let first = repo.get_or_create(StatusKind::Payment, "Оплачен").await.unwrap();
    let second = repo.get_or_create(StatusKind::Payment, " Оплачен ").await.unwrap();
    let by_enum = payment_status_id(&db, PaymentStatusName::Paid).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.id, by_enum);
    assert_eq!(repo.list(StatusKind::Payment).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_tables_are_independent() {
    let db = setup_db().await;
    let repo = StatusRepository::new(db.clone());

    repo.get_or_create(StatusKind::Product, "Активен").await.unwrap();
    repo.get_or_create(StatusKind::Product, "Закрыт").await.unwrap();
    repo.get_or_create(StatusKind::Transaction, "Отменено").await.unwrap();

    let products = repo.list(StatusKind::Product).await.unwrap();
    assert_eq!(
        products.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["Активен", "Закрыт"]
    );
    assert_eq!(repo.list(StatusKind::Transaction).await.unwrap().len(), 1);
    assert!(repo.list(StatusKind::Payment).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_name_rejected() {
    let db = setup_db().await;
    let repo = StatusRepository::new(db);

    assert!(matches!(
        repo.get_or_create(StatusKind::Product, "   ").await,
        Err(StatusError::EmptyName)
    ));
}

#[tokio::test]
async fn test_name_length_is_counted_in_characters() {
    let db = setup_db().await;
    let repo = StatusRepository::new(db);

    let longest = "Я".repeat(MAX_STATUS_NAME_LEN);
    let row = repo.get_or_create(StatusKind::Payment, &longest).await.unwrap();
    assert_eq!(row.name, longest);

    let err = repo
        .get_or_create(StatusKind::Payment, &"Я".repeat(MAX_STATUS_NAME_LEN + 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StatusError::NameTooLong {
            max: MAX_STATUS_NAME_LEN
        }
    ));
    assert_eq!(AppError::from(err).status_code(), 400);
    assert_eq!(repo.list(StatusKind::Payment).await.unwrap().len(), 1);
}
