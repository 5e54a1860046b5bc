//! Integration tests for loading schedule reports.

mod common;

use common::{open_product, seed_client, setup_db};
use mfo_core::reports::ReportError;
use mfo_core::reports::csv::render_csv;
use mfo_core::schedule::ProductBehavior as Behavior;
use mfo_db::ReportRepository;
use mfo_db::entities::sea_orm_active_enums::ProductBehavior;
use mfo_db::repositories::ReportDataError;
use mfo_shared::ReportConfig;
use mfo_shared::types::ProductId;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_credit_report_projection() {
    let db = setup_db().await;
    let client_id = seed_client(&db, "Ivanov Ivan").await;
    let product =
        open_product(&db, client_id, ProductBehavior::Credit, dec!(120000), dec!(12), 12).await;

    let report = ReportRepository::new(db)
        .build(ProductId::new(product.product.id))
        .await
        .unwrap();

    assert_eq!(report.product.client_name, "Ivanov Ivan");
    assert_eq!(report.product.behavior, Behavior::Credit);
    assert_eq!(report.rows.len(), 12);
    assert_eq!(report.total_to_collect, dec!(134400));
    assert_eq!(report.interest_amount, dec!(14400));
    assert_eq!(report.rows[0].remaining, dec!(123200));
    assert_eq!(report.rows[0].interest, dec!(3200));
    assert_eq!(report.rows[11].remaining, dec!(0));

    let csv = String::from_utf8(render_csv(&report, &ReportConfig::default()).unwrap()).unwrap();
    assert!(csv.contains("Ivanov Ivan"));
    assert!(csv.contains("123200.00"));
}

#[tokio::test]
async fn test_missing_product() {
    let db = setup_db().await;

    let err = ReportRepository::new(db)
        .build(ProductId::new(31))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReportDataError::Report(ReportError::ProductNotFound(_))
    ));
}
