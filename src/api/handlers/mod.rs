//! HTTP handlers for heroes, powers and hero powers.
//!
//! Handlers parse inputs and map outcomes to status codes; SQL lives in
//! `crate::heroes::repo`. Error bodies come in two shapes: lookups answer
//! `{"error": "..."}` while writes answer `{"errors": ["..."]}`.

pub mod health;
pub mod hero_powers;
pub mod heroes;
pub mod powers;
pub mod root;

use axum::{
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

pub const VALIDATION_ERRORS: &str = "validation errors";

/// Single-message error body returned by lookups.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Error list body returned by writes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// `404 {"error": ..}` for a missing id in the path.
    NotFound(&'static str),
    /// `404 {"errors": [..]}` for a missing id referenced from a request body.
    MissingReference(&'static str),
    /// `400 {"errors": [..]}`
    BadRequest(String),
    Database(sqlx::Error),
}

impl ApiError {
    #[must_use]
    pub fn validation() -> Self {
        Self::BadRequest(VALIDATION_ERRORS.to_string())
    }
}

/// Unwraps an integer path id. Malformed ids get the same 404 as missing rows.
///
/// # Errors
/// Returns `ApiError::NotFound(not_found)` when the segment is not an `i64`.
pub fn path_id(
    path: Result<Path<i64>, PathRejection>,
    not_found: &'static str,
) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound(not_found))
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl IntoResponse for ApiError {
    /// Database errors are logged and surfaced as `500` without details.
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: message.to_string(),
                }),
            )
                .into_response(),
            Self::MissingReference(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorsBody {
                    errors: vec![message.to_string()],
                }),
            )
                .into_response(),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorsBody {
                    errors: vec![message],
                }),
            )
                .into_response(),
            Self::Database(err) => {
                error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
