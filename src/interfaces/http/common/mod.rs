//! Shared HTTP response types and extractors

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::{AppError, DomainError};

/// Error envelope returned by every endpoint: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map an application error to a status code and a client-safe message.
pub fn error_response(e: AppError) -> ApiError {
    let (status, message) = match &e {
        AppError::Domain(DomainError::AuthenticationFailed) => {
            (StatusCode::UNAUTHORIZED, e.to_string())
        }
        AppError::Domain(DomainError::InvalidInput(_)) => (StatusCode::BAD_REQUEST, e.to_string()),
        AppError::Domain(DomainError::Configuration(_) | DomainError::SeedingFailed(_))
        | AppError::Infra(_) => {
            error!("Request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_maps_to_401() {
        let (status, Json(body)) = error_response(DomainError::AuthenticationFailed.into());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let (status, Json(body)) =
            error_response(DomainError::Configuration("secret is 3 bytes".into()).into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn error_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "nope"}));
    }
}
