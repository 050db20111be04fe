use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use fruitstand_core::error::INVALID_PAYLOAD;
use fruitstand_core::DomainError;
use fruitstand_infra::StoreError;

/// Failure of a `/fruits` operation, rendered as the JSON error envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body missing, not JSON, JSON `null`, or sent with a non-JSON content type.
    #[error("{}", INVALID_PAYLOAD)]
    InvalidPayload,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Storage failed inside a transactional operation. Carries the storage message.
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::InvalidId(_) | DomainError::NotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = status.as_u16(), error = %self, "fruit operation failed");
        } else {
            tracing::debug!(code = status.as_u16(), error = %self, "fruit request rejected");
        }
        json_error(status, self.to_string())
    }
}

/// Storage failure on a read path that does no error translation.
///
/// Rendered as a bare `500 Internal Server Error` without the JSON envelope.
#[derive(Debug, Error)]
#[error("unhandled storage fault: {0}")]
pub struct StoreFault(#[from] pub StoreError);

impl IntoResponse for StoreFault {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "unhandled storage fault");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Error envelope: `{"error": <message>, "code": <status>}` with the matching status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": status.as_u16(),
        })),
    )
        .into_response()
}
