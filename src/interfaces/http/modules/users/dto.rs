//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::UserSummary;

/// User as exposed by the API. Never carries a password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "jperez")]
    pub username: String,
    #[schema(example = "juan.perez@designli.co")]
    pub email: String,
    #[schema(example = "Juan")]
    pub name: String,
    #[schema(example = "Pérez")]
    pub last_name: String,
}

impl From<UserSummary> for UserDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            name: u.name,
            last_name: u.last_name,
        }
    }
}
