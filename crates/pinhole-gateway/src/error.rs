use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::CoreError;
use pinhole_shortener::ShortenerError;
use serde::Serialize;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    Conflict(String),
    NotFound,
    Invalid(String),
    Unauthorized,
    Internal(String),
}

impl From<ShortenerError> for ApiError {
    fn from(err: ShortenerError) -> Self {
        match err {
            ShortenerError::AliasConflict(alias) => Self::Conflict(alias),
            ShortenerError::NotFound(_) => Self::NotFound,
            ShortenerError::InvalidUrl(message) => Self::Invalid(message),
            ShortenerError::Storage(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Invalid(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Conflict(alias) => (
                StatusCode::CONFLICT,
                format!("alias already exists: {alias}"),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, "short link not found".to_owned()),
            Self::Invalid(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "invalid or missing token".to_owned(),
            ),
            Self::Internal(message) => {
                error!(%message, "request failed");
                // The client gets a generic body; the detail stays in the log.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
