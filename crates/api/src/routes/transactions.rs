//! Transaction routes and the approval gate.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use mfo_core::workflow::{ApprovalDecision, ApprovalState};
use mfo_db::entities::transactions;
use mfo_db::repositories::{CreateTransactionInput, TransactionFilter};
use mfo_db::{TransactionRepository, WorkflowRepository};
use mfo_shared::AppError;
use mfo_shared::types::{PageRequest, PageResponse, TransactionId, format_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::error_response;
use super::schedules::ScheduleEntryResponse;
use crate::{AppState, middleware::AuthUser};

/// Where staff land after deciding on a transaction.
pub const TRANSACTIONS_PATH: &str = "/api/v1/transactions";

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route("/transactions/{transaction_id}/approve", post(approve_transaction))
        .route("/transactions/{transaction_id}/reject", post(reject_transaction))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// `pending`, `approved` or `rejected`.
    pub approval: Option<String>,
    /// Client.
    pub client_id: Option<i32>,
    /// Product.
    pub product_id: Option<i32>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 50, max 200).
    pub per_page: Option<u32>,
}

/// Request body for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Client.
    pub client_id: i32,
    /// Product.
    pub product_id: i32,
    /// Amount moved.
    pub amount: Decimal,
    /// Optional classification.
    pub transaction_type_id: Option<i32>,
    /// Schedule entry this transaction settles.
    pub payment_schedule_id: Option<i32>,
}

/// Transaction as returned by the API.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: i32,
    /// Client.
    pub client_id: i32,
    /// Product.
    pub product_id: i32,
    /// Amount.
    pub amount: String,
    /// Classification.
    pub transaction_type_id: Option<i32>,
    /// Creation timestamp.
    pub date: String,
    /// Approval state.
    pub approval: ApprovalState,
    /// Approval state as shown to staff.
    pub approval_label: &'static str,
    /// Deciding manager.
    pub approved_by: Option<i32>,
    /// Transaction status.
    pub status_id: Option<i32>,
}

impl From<&transactions::Model> for TransactionResponse {
    fn from(t: &transactions::Model) -> Self {
        let approval = ApprovalState::from_flag(t.approved);
        Self {
            id: t.id,
            client_id: t.client_id,
            product_id: t.product_id,
            amount: format_money(t.amount),
            transaction_type_id: t.transaction_type_id,
            date: t.date.to_rfc3339(),
            approval,
            approval_label: approval.label(),
            approved_by: t.approved_by,
            status_id: t.status_id,
        }
    }
}

/// GET `/transactions` - list transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    let approval = match query.approval.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => match ApprovalState::parse(raw) {
            Some(state) => Some(state),
            None => {
                return error_response(AppError::Validation(format!(
                    "unknown approval state '{raw}'"
                )));
            }
        },
        None => None,
    };
    let page = PageRequest::new(query.page, query.per_page);
    let filter = TransactionFilter {
        approval,
        client_id: query.client_id,
        product_id: query.product_id,
    };

    match TransactionRepository::new((*state.db).clone())
        .list(&filter, page)
        .await
    {
        Ok((rows, total)) => {
            let data = rows.iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(PageResponse::new(data, page, total))).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// POST `/transactions` - record a pending transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> Response {
    let input = CreateTransactionInput {
        client_id: payload.client_id,
        product_id: payload.product_id,
        amount: payload.amount,
        transaction_type_id: payload.transaction_type_id,
        payment_schedule_id: payload.payment_schedule_id,
    };

    match TransactionRepository::new((*state.db).clone())
        .create(input, Utc::now())
        .await
    {
        Ok(created) => {
            info!(
                transaction_id = created.transaction.id,
                manager_id = %auth.manager_id(),
                "Transaction recorded via API"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "transaction": TransactionResponse::from(&created.transaction),
                    "settled": created.settled.map(ScheduleEntryResponse::from),
                })),
            )
                .into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// GET `/transactions/{transaction_id}`.
async fn get_transaction(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(transaction_id): Path<i32>,
) -> Response {
    match TransactionRepository::new((*state.db).clone())
        .find(TransactionId::new(transaction_id))
        .await
    {
        Ok(t) => (StatusCode::OK, Json(TransactionResponse::from(&t))).into_response(),
        Err(e) => error_response(e.into()),
    }
}

async fn decide(
    state: &AppState,
    auth: &AuthUser,
    transaction_id: i32,
    decision: ApprovalDecision,
) -> Response {
    match WorkflowRepository::new((*state.db).clone())
        .decide(TransactionId::new(transaction_id), decision, auth.manager_id())
        .await
    {
        Ok(_) => Redirect::to(TRANSACTIONS_PATH).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// POST `/transactions/{transaction_id}/approve` - 303 to the transaction list.
async fn approve_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<i32>,
) -> Response {
    decide(&state, &auth, transaction_id, ApprovalDecision::Approve).await
}

/// POST `/transactions/{transaction_id}/reject` - 303 to the transaction list.
async fn reject_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<i32>,
) -> Response {
    decide(&state, &auth, transaction_id, ApprovalDecision::Reject).await
}
