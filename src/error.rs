use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified application error type mapped to HTTP responses.
///
/// Not-found pages and JSON not-found bodies are content-negotiated inside
/// the handlers; the variants here cover everything the handlers bail out
/// of with `?`.
pub enum AppError {
    /// 400 with an empty body: unsupported media type or a body that does
    /// not parse under its declared `Content-Type`.
    Malformed,
    /// 400 with `{ "errors": [...] }`: input failed validation.
    Validation(Vec<String>),
    /// 404 with an empty body (update/delete against a missing slug).
    NotFound,
    /// 500 Internal Server Error (wraps any error, logs details, returns generic message)
    Internal(anyhow::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed request"),
            Self::Validation(errors) => write!(f, "validation failed: {}", errors.join(", ")),
            Self::NotFound => write!(f, "not found"),
            Self::Internal(err) => write!(f, "{err:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Malformed => StatusCode::BAD_REQUEST.into_response(),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

/// Allow `?` to automatically convert any `anyhow::Error` into `AppError::Internal`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
