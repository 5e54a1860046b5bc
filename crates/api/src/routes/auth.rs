//! Staff login.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use mfo_db::ManagerRepository;
use mfo_shared::auth::{LoginRequest, LoginResponse, ManagerInfo};
use mfo_shared::types::ManagerId;
use mfo_shared::AppError;
use tracing::{error, info};

use super::error_response;
use crate::AppState;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST `/auth/login` - verify credentials and issue an access token.
async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let repo = ManagerRepository::new((*state.db).clone());

    let auth = match repo.authenticate(&payload.username, &payload.password).await {
        Ok(auth) => auth,
        Err(e) => return error_response(e.into()),
    };

    let permissions = auth.capabilities.codenames();
    let manager_id = ManagerId::new(auth.manager.id);

    let access_token = match state.jwt_service.generate_access_token(
        manager_id,
        &auth.manager.username,
        auth.manager.is_superuser,
        permissions.clone(),
    ) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, manager_id = %manager_id, "Failed to issue access token");
            return error_response(AppError::Internal(e.to_string()));
        }
    };

    info!(manager_id = %manager_id, "Manager logged in");

    (
        StatusCode::OK,
        Json(LoginResponse {
            access_token,
            expires_in: state.jwt_service.access_token_expires_in(),
            manager: ManagerInfo {
                id: manager_id,
                username: auth.manager.username,
                full_name: auth.manager.full_name,
                role: auth.role.map(|r| r.name),
                is_superuser: auth.manager.is_superuser,
                permissions,
            },
        }),
    )
        .into_response()
}
