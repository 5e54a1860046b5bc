//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use mfo_shared::AppError;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod health;
pub mod products;
pub mod reports;
pub mod schedules;
pub mod transactions;

/// Converts an application error into the JSON error body.
///
/// Server-side failures are logged in full and reported generically.
pub fn error_response(err: AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if err.is_client_error() {
        err.to_string()
    } else {
        error!(error = %err, code = err.error_code(), "Request failed");
        "An internal error occurred".to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message
        })),
    )
        .into_response()
}

/// Creates the public API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(auth::routes())
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(clients::routes())
        .merge(products::routes())
        .merge(schedules::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
        .merge(catalog::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    api_routes().merge(protected_routes)
}
