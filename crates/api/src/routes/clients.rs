//! Client routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use mfo_db::ClientRepository;
use mfo_db::entities::sea_orm_active_enums::Gender;
use mfo_db::repositories::{ClientFilter, ClientWithContact, CreateClientInput};
use mfo_shared::types::{ClientId, PageRequest, PageResponse, format_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error_response;
use super::products::ProductResponse;
use crate::{AppState, middleware::AuthUser};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/{client_id}", get(get_client))
}

/// Query parameters for listing clients.
#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    /// Substring over name, phone, passport and work place.
    pub search: Option<String>,
    /// `M` or `F`.
    pub gender: Option<Gender>,
    /// Born on or after (YYYY-MM-DD).
    pub birth_from: Option<NaiveDate>,
    /// Born on or before (YYYY-MM-DD).
    pub birth_to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 50, max 200).
    pub per_page: Option<u32>,
}

/// Request body for creating a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Passport series.
    pub passport_series: String,
    /// Passport number.
    pub passport_number: String,
    /// Monthly salary.
    pub salary: Option<Decimal>,
    /// Employer.
    pub work_place: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// `M` or `F`.
    pub gender: Option<Gender>,
}

/// Client as returned by the API.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: i32,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Passport series.
    pub passport_series: String,
    /// Passport number.
    pub passport_number: String,
    /// Monthly salary.
    pub salary: Option<String>,
    /// Employer.
    pub work_place: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<Gender>,
}

impl From<ClientWithContact> for ClientResponse {
    fn from(value: ClientWithContact) -> Self {
        let ClientWithContact { client, contact } = value;
        Self {
            id: client.id,
            name: contact.name,
            phone: contact.phone,
            address: contact.address,
            passport_series: contact.passport_series,
            passport_number: contact.passport_number,
            salary: client.salary.map(format_money),
            work_place: client.work_place,
            birth_date: client.birth_date,
            gender: client.gender,
        }
    }
}

/// GET `/clients` - search clients.
async fn list_clients(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListClientsQuery>,
) -> Response {
    let page = PageRequest::new(query.page, query.per_page);
    let filter = ClientFilter {
        search: query.search,
        gender: query.gender,
        birth_from: query.birth_from,
        birth_to: query.birth_to,
    };

    match ClientRepository::new((*state.db).clone())
        .list(&filter, page)
        .await
    {
        Ok((clients, total)) => {
            let data = clients.into_iter().map(ClientResponse::from).collect();
            (StatusCode::OK, Json(PageResponse::new(data, page, total))).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// POST `/clients` - register a client with their contact details.
async fn create_client(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateClientRequest>,
) -> Response {
    let input = CreateClientInput {
        name: payload.name,
        phone: payload.phone,
        address: payload.address,
        passport_series: payload.passport_series,
        passport_number: payload.passport_number,
        salary: payload.salary,
        work_place: payload.work_place,
        birth_date: payload.birth_date,
        gender: payload.gender,
    };

    match ClientRepository::new((*state.db).clone()).create(input).await {
        Ok(client) => (StatusCode::CREATED, Json(ClientResponse::from(client))).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET `/clients/{client_id}` - client with products.
async fn get_client(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(client_id): Path<i32>,
) -> Response {
    match ClientRepository::new((*state.db).clone())
        .find_details(ClientId::new(client_id))
        .await
    {
        Ok(details) => {
            let products: Vec<ProductResponse> =
                details.products.iter().map(ProductResponse::from).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "client": ClientResponse::from(details.client),
                    "products": products,
                })),
            )
                .into_response()
        }
        Err(e) => error_response(e.into()),
    }
}
