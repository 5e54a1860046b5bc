//! Catalog routes: product types, transaction types and status tables.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use mfo_core::schedule::ProductBehavior;
use mfo_core::status::StatusKind;
use mfo_db::{CatalogRepository, StatusRepository};
use mfo_shared::AppError;
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::{AppState, middleware::AuthUser};

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product-types",
            get(list_product_types).post(create_product_type),
        )
        .route(
            "/transaction-types",
            get(list_transaction_types).post(create_transaction_type),
        )
        .route("/statuses/{kind}", get(list_statuses).post(create_status))
}

/// Request body for creating a product type.
#[derive(Debug, Deserialize)]
pub struct CreateProductTypeRequest {
    /// Display name.
    pub name: String,
    /// `deposit` or `credit`.
    pub behavior: ProductBehavior,
}

/// Request body for creating a named row.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    /// Display name.
    pub name: String,
}

fn parse_kind(raw: &str) -> Result<StatusKind, Response> {
    StatusKind::parse(raw).ok_or_else(|| {
        error_response(AppError::Validation(format!(
            "unknown status kind '{raw}', expected product, payment or transaction"
        )))
    })
}

/// GET `/product-types`.
async fn list_product_types(State(state): State<AppState>, _auth: AuthUser) -> Response {
    match CatalogRepository::new((*state.db).clone())
        .list_product_types()
        .await
    {
        Ok(types) => (StatusCode::OK, Json(json!({ "product_types": types }))).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// POST `/product-types`.
async fn create_product_type(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateProductTypeRequest>,
) -> Response {
    match CatalogRepository::new((*state.db).clone())
        .create_product_type(&payload.name, payload.behavior.into())
        .await
    {
        Ok(model) => (StatusCode::CREATED, Json(model)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET `/transaction-types`.
async fn list_transaction_types(State(state): State<AppState>, _auth: AuthUser) -> Response {
    match CatalogRepository::new((*state.db).clone())
        .list_transaction_types()
        .await
    {
        Ok(types) => {
            (StatusCode::OK, Json(json!({ "transaction_types": types }))).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// POST `/transaction-types`.
async fn create_transaction_type(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<NameRequest>,
) -> Response {
    match CatalogRepository::new((*state.db).clone())
        .create_transaction_type(&payload.name)
        .await
    {
        Ok(model) => (StatusCode::CREATED, Json(model)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET `/statuses/{kind}`.
async fn list_statuses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(kind): Path<String>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match StatusRepository::new((*state.db).clone()).list(kind).await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "statuses": rows }))).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// POST `/statuses/{kind}` - get-or-create a named status.
async fn create_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(kind): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match StatusRepository::new((*state.db).clone())
        .get_or_create(kind, &payload.name)
        .await
    {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(e) => error_response(e.into()),
    }
}
