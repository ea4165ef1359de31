//! API error envelope: every failure serializes as `{"message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use holocron_core::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Fixed user-facing message for a failed synchronization run. The internal
/// cause is logged server-side and never surfaces here.
pub const SYNC_FAILED_MESSAGE: &str = "Syncing of data from SWAPI has failed!";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(String),
    SyncFailed,
    Unauthorized,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(what) => ApiError::NotFound(format!("{what} not found!")),
            Error::Validation(message) => ApiError::Validation(message),
            Error::SyncFailed => ApiError::SyncFailed,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                format!("Validation failed: {message}"),
            ),
            ApiError::SyncFailed => (StatusCode::BAD_REQUEST, SYNC_FAILED_MESSAGE.to_string()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication credentials were not provided!".to_string(),
            ),
            ApiError::Internal(detail) => {
                error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected server error occurred!".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
