//! Product routes.
//!
//! Opening a product also creates its payment schedule; both are committed
//! together or not at all.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use chrono::Utc;
use mfo_db::ProductRepository;
use mfo_db::entities::products;
use mfo_db::repositories::{CreateProductInput, ProductFilter};
use mfo_shared::types::{PageRequest, PageResponse, ProductId, format_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::clients::ClientResponse;
use super::error_response;
use super::schedules::ScheduleEntryResponse;
use crate::{AppState, middleware::AuthUser};

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{product_id}", get(get_product))
        .route("/products/{product_id}/status", patch(update_product_status))
}

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Product id, client id, client name or phone, or passport.
    pub search: Option<String>,
    /// Exact product type.
    pub product_type_id: Option<i32>,
    /// Exact status.
    pub status_id: Option<i32>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 50, max 200).
    pub per_page: Option<u32>,
}

/// Request body for opening a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Owning client.
    pub client_id: i32,
    /// Product type.
    pub product_type_id: i32,
    /// Principal.
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Term in months.
    pub duration: i32,
    /// Initial status; defaults to "Активен".
    pub status_id: Option<i32>,
}

/// Request body for changing a product's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New product status.
    pub status_id: i32,
}

/// Product as returned by the API.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: i32,
    /// Owning client.
    pub client_id: i32,
    /// Product type.
    pub product_type_id: i32,
    /// Principal.
    pub amount: String,
    /// Annual interest rate in percent.
    pub interest_rate: String,
    /// Term in months.
    pub duration: i32,
    /// Status ID.
    pub status_id: i32,
    /// Opening timestamp.
    pub created_at: String,
}

impl From<&products::Model> for ProductResponse {
    fn from(p: &products::Model) -> Self {
        Self {
            id: p.id,
            client_id: p.client_id,
            product_type_id: p.product_type_id,
            amount: format_money(p.amount),
            interest_rate: format_money(p.interest_rate),
            duration: p.duration,
            status_id: p.status_id,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// GET `/products` - search products.
async fn list_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListProductsQuery>,
) -> Response {
    let page = PageRequest::new(query.page, query.per_page);
    let filter = ProductFilter {
        search: query.search,
        product_type_id: query.product_type_id,
        status_id: query.status_id,
    };

    match ProductRepository::new((*state.db).clone())
        .list(&filter, page)
        .await
    {
        Ok((rows, total)) => {
            let data = rows.iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(PageResponse::new(data, page, total))).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// POST `/products` - open a product and generate its payment schedule.
async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Response {
    let input = CreateProductInput {
        client_id: payload.client_id,
        product_type_id: payload.product_type_id,
        amount: payload.amount,
        interest_rate: payload.interest_rate,
        duration: payload.duration,
        status_id: payload.status_id,
    };

    match ProductRepository::new((*state.db).clone())
        .create_with_schedule(input, Utc::now())
        .await
    {
        Ok(created) => {
            info!(
                product_id = created.product.id,
                manager_id = %auth.manager_id(),
                "Product opened via API"
            );
            let schedule: Vec<ScheduleEntryResponse> = created
                .schedule
                .into_iter()
                .map(ScheduleEntryResponse::from)
                .collect();
            (
                StatusCode::CREATED,
                Json(json!({
                    "product": ProductResponse::from(&created.product),
                    "schedule": schedule,
                })),
            )
                .into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// GET `/products/{product_id}` - product with client and schedule.
async fn get_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(product_id): Path<i32>,
) -> Response {
    match ProductRepository::new((*state.db).clone())
        .find_details(ProductId::new(product_id))
        .await
    {
        Ok(details) => {
            let schedule: Vec<ScheduleEntryResponse> = details
                .schedule
                .into_iter()
                .map(ScheduleEntryResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "product": ProductResponse::from(&details.product),
                    "product_type": details.product_type,
                    "status": details.status,
                    "client": details.client.map(ClientResponse::from),
                    "schedule": schedule,
                })),
            )
                .into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// PATCH `/products/{product_id}/status` - move a product to another status.
async fn update_product_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Response {
    match ProductRepository::new((*state.db).clone())
        .update_status(ProductId::new(product_id), payload.status_id)
        .await
    {
        Ok(product) => (StatusCode::OK, Json(ProductResponse::from(&product))).into_response(),
        Err(e) => error_response(e.into()),
    }
}
