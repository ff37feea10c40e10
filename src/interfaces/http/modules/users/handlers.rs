//! User directory handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use tracing::debug;

use super::dto::UserDto;
use crate::application::IdentityService;
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All registered users", body = Vec<UserDto>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Json<Vec<UserDto>> {
    let users: Vec<UserDto> = state
        .identity
        .list_users()
        .into_iter()
        .map(UserDto::from)
        .collect();
    debug!(caller = %caller.username, count = users.len(), "Listed users");
    Json(users)
}
