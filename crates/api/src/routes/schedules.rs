//! Payment schedule routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use mfo_db::ScheduleRepository;
use mfo_db::repositories::{ScheduleEntry, ScheduleFilter};
use mfo_shared::AppError;
use mfo_shared::types::format_money;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error_response;
use crate::{AppState, middleware::AuthUser};

/// Creates the payment schedule routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/payment-schedules", get(list_schedule_entries))
}

/// Query parameters for listing schedule entries.
#[derive(Debug, Deserialize)]
pub struct ListScheduleQuery {
    /// Owning product.
    pub product_id: Option<i32>,
    /// Payment status.
    pub status_id: Option<i32>,
    /// Due on or after (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Due on or before (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// Schedule entry as returned by the API.
#[derive(Debug, Serialize)]
pub struct ScheduleEntryResponse {
    /// Entry ID.
    pub id: i32,
    /// Owning product.
    pub product_id: i32,
    /// Installment amount.
    pub amount: String,
    /// Due date.
    pub scheduled_date: NaiveDate,
    /// Date the settling transaction was made.
    pub actual_date: Option<NaiveDate>,
    /// Status ID.
    pub status_id: Option<i32>,
    /// Status name.
    pub status: Option<String>,
    /// Settling transaction.
    pub transaction_id: Option<i32>,
}

impl From<ScheduleEntry> for ScheduleEntryResponse {
    fn from(value: ScheduleEntry) -> Self {
        let ScheduleEntry { entry, status } = value;
        Self {
            id: entry.id,
            product_id: entry.product_id,
            amount: format_money(entry.amount),
            scheduled_date: entry.scheduled_date,
            actual_date: entry.actual_date,
            status_id: entry.status_id,
            status,
            transaction_id: entry.transaction_id,
        }
    }
}

/// GET `/payment-schedules` - list schedule entries in due order.
async fn list_schedule_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListScheduleQuery>,
) -> Response {
    let filter = ScheduleFilter {
        product_id: query.product_id,
        status_id: query.status_id,
        from: query.from,
        to: query.to,
    };

    match ScheduleRepository::new((*state.db).clone())
        .list(&filter)
        .await
    {
        Ok(entries) => {
            let items: Vec<ScheduleEntryResponse> =
                entries.into_iter().map(ScheduleEntryResponse::from).collect();
            (StatusCode::OK, Json(json!({ "payment_schedules": items }))).into_response()
        }
        Err(e) => error_response(AppError::Database(e.to_string())),
    }
}
