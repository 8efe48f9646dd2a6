//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use assetdesk_domain::error::{AssetDeskError, ValidationError};

use crate::response::ApiResponse;

/// Maps [`AssetDeskError`] to an HTTP response with appropriate status code.
///
/// The body is an envelope with `response: null` and the error text as
/// `message`.
#[derive(Debug)]
pub struct ApiError(AssetDeskError);

impl From<AssetDeskError> for ApiError {
    fn from(err: AssetDeskError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AssetDeskError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AssetDeskError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AssetDeskError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            AssetDeskError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AssetDeskError::Identity(err) => {
                tracing::error!(error = %err, "identity provider error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        envelope(status, message)
    }
}

/// Error envelope with `response: null` and `message`.
pub(crate) fn envelope(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::empty().with_message(message))).into_response()
}
