//! Integration tests for the transaction approval gate.

mod common;

use common::{open_product, opened_at, seed_client, seed_manager, setup_db};
use mfo_core::status::{StatusKind, TransactionStatusName};
use mfo_core::workflow::{ApprovalDecision, ApprovalState, WorkflowError};
use mfo_db::entities::sea_orm_active_enums::ProductBehavior;
use mfo_db::entities::{managers, role_permissions, transactions};
use mfo_db::repositories::CreateTransactionInput;
use mfo_db::{StatusRepository, TransactionRepository, WorkflowRepository};
use mfo_shared::types::{ManagerId, TransactionId};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

struct Fixture {
    db: DatabaseConnection,
    approver: ManagerId,
    clerk: ManagerId,
    transaction: TransactionId,
}

async fn fixture() -> Fixture {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;
    let product =
        open_product(&db, client_id, ProductBehavior::Credit, dec!(1000), dec!(12), 2).await;
    let created = TransactionRepository::new(db.clone())
        .create(
            CreateTransactionInput {
                client_id,
                product_id: product.product.id,
                amount: dec!(500),
                transaction_type_id: None,
                payment_schedule_id: None,
            },
            opened_at(),
        )
        .await
        .unwrap();
    let approver = seed_manager(&db, "senior", &["approve_transaction"], false).await;
    let clerk = seed_manager(&db, "clerk", &[], false).await;

    Fixture {
        db,
        approver,
        clerk,
        transaction: TransactionId::new(created.transaction.id),
    }
}

async fn reload(db: &DatabaseConnection, id: TransactionId) -> transactions::Model {
    transactions::Entity::find_by_id(id.into_inner())
        .one(db)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_approve_pending_transaction() {
    let f = fixture().await;
    let repo = WorkflowRepository::new(f.db.clone());

    let updated = repo.approve(f.transaction, f.approver).await.unwrap();

    assert_eq!(updated.approved, Some(true));
    assert_eq!(updated.approved_by, Some(f.approver.into_inner()));
    assert_eq!(updated.status_id, None);
}

#[tokio::test]
async fn test_reject_sets_cancelled_status() {
    let f = fixture().await;
    let repo = WorkflowRepository::new(f.db.clone());

    let updated = repo.reject(f.transaction, f.approver).await.unwrap();

    assert_eq!(updated.approved, Some(false));
    let status = StatusRepository::new(f.db.clone())
        .find(StatusKind::Transaction, updated.status_id.expect("status should be set"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.name, TransactionStatusName::Cancelled.as_str());
}

#[tokio::test]
async fn test_second_decision_is_refused() {
    let f = fixture().await;
    let repo = WorkflowRepository::new(f.db.clone());
    repo.approve(f.transaction, f.approver).await.unwrap();

    let err = repo
        .decide(f.transaction, ApprovalDecision::Reject, f.approver)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::AlreadyProcessed {
            state: ApprovalState::Approved
        }
    );
    let current = reload(&f.db, f.transaction).await;
    assert_eq!(current.approved, Some(true));
    assert_eq!(current.status_id, None);
}

#[tokio::test]
async fn test_missing_capability_changes_nothing() {
    let f = fixture().await;
    let repo = WorkflowRepository::new(f.db.clone());

    let err = repo.approve(f.transaction, f.clerk).await.unwrap_err();

    assert!(matches!(err, WorkflowError::PermissionDenied { .. }));
    let current = reload(&f.db, f.transaction).await;
    assert_eq!(current.approved, None);
    assert_eq!(current.approved_by, None);
}

#[tokio::test]
async fn test_revoked_permission_is_enforced() {
    let f = fixture().await;
    role_permissions::Entity::delete_many()
        .exec(&f.db)
        .await
        .unwrap();

    let err = WorkflowRepository::new(f.db.clone())
        .approve(f.transaction, f.approver)
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::PermissionDenied { .. }));
    assert_eq!(reload(&f.db, f.transaction).await.approved, None);
}

#[tokio::test]
async fn test_deactivated_manager_cannot_decide() {
    let f = fixture().await;
    let mut manager = managers::Entity::find_by_id(f.approver.into_inner())
        .one(&f.db)
        .await
        .unwrap()
        .unwrap()
        .into_active_model();
    manager.is_active = Set(false);
    manager.update(&f.db).await.unwrap();

    let err = WorkflowRepository::new(f.db.clone())
        .reject(f.transaction, f.approver)
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::InactiveManager(f.approver));
    let current = reload(&f.db, f.transaction).await;
    assert_eq!(current.approved, None);
    assert_eq!(current.status_id, None);
}

#[tokio::test]
async fn test_unknown_manager_cannot_decide() {
    let f = fixture().await;

    let err = WorkflowRepository::new(f.db.clone())
        .approve(f.transaction, ManagerId::new(9999))
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::InactiveManager(ManagerId::new(9999)));
}

#[tokio::test]
async fn test_superuser_may_decide() {
    let f = fixture().await;
    let admin = seed_manager(&f.db, "admin", &[], true).await;

    let updated = WorkflowRepository::new(f.db.clone())
        .reject(f.transaction, admin)
        .await
        .unwrap();
    assert_eq!(updated.approved, Some(false));
    assert_eq!(updated.approved_by, Some(admin.into_inner()));
}

#[tokio::test]
async fn test_unknown_transaction() {
    let f = fixture().await;
    let repo = WorkflowRepository::new(f.db.clone());

    let err = repo
        .approve(TransactionId::new(9999), f.approver)
        .await
        .unwrap_err();
    assert_eq!(err, WorkflowError::TransactionNotFound(TransactionId::new(9999)));
}
