//! Login DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jperez")]
    #[validate(length(min = 1, max = 100, message = "username is required"))]
    pub username: String,
    #[schema(example = "password@123")]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}
