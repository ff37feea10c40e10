//! Access API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{LoginRequest, LoginResponse};
use crate::application::IdentityService;
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct AccessHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/api/access/user/login",
    tag = "Access",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, JWT issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ApiResponse<String>),
        (status = 422, description = "Missing username or password", body = ApiResponse<String>)
    )
)]
pub async fn login(
    State(state): State<AccessHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state
        .identity
        .login(&request.username, &request.password)
        .map_err(error_response)?;

    Ok(Json(LoginResponse {
        token: result.token,
        username: result.username,
        token_type: "Bearer".to_string(),
        expires_in: result.expires_in,
    }))
}
