//! Request body extractor for the access endpoints
//!
//! `ValidatedJson<T>` deserializes the body and runs `Validate` on it. Every
//! rejection is answered with the `ApiResponse` error envelope:
//!
//! - body is not JSON, or the content type is wrong: axum's status (400 / 415)
//! - JSON of the wrong shape, e.g. a missing `password`: 422
//! - fields present but failing validation, e.g. an empty `username`: 422

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::{ApiError, ApiResponse};

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Body(JsonRejection),
    Invalid(ValidationErrors),
}

impl ValidatedJsonRejection {
    pub fn into_api_error(self) -> ApiError {
        let (status, message) = match self {
            Self::Body(rejection) => (rejection.status(), rejection.body_text()),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, field_messages(&errors)),
        };
        (status, Json(ApiResponse::error(message)))
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        self.into_api_error().into_response()
    }
}

/// `field: message` pairs in field order, joined with `; `.
fn field_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Body)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(Self(value))
    }
}
