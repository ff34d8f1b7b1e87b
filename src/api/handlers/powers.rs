//! Power endpoints. The only write is `PATCH /powers/{id}`, which replaces the
//! description after checking it through `Power::set_description`.

use super::{path_id, ApiError, ErrorBody, ErrorsBody};
use crate::heroes::{HeroRepo, Power};
use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{debug, instrument};
use utoipa::ToSchema;

pub const POWER_NOT_FOUND: &str = "Power not found";
pub const NO_VALID_FIELDS: &str = "No valid fields to update";

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePowerRequest {
    /// Must be a string of at least 20 characters; any other JSON value is rejected.
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
}

#[utoipa::path(
    get,
    path = "/powers",
    responses(
        (status = 200, description = "All powers.", body = [Power]),
    ),
    tag = "powers"
)]
#[instrument(skip(pool))]
pub async fn list_powers(pool: Extension<SqlitePool>) -> Result<Json<Vec<Power>>, ApiError> {
    Ok(Json(HeroRepo::list_powers(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/powers/{id}",
    params(("id" = i64, Path, description = "Power id")),
    responses(
        (status = 200, description = "Power.", body = Power),
        (status = 404, description = "Power not found.", body = ErrorBody),
    ),
    tag = "powers"
)]
#[instrument(skip(pool))]
pub async fn get_power(
    id: Result<Path<i64>, PathRejection>,
    pool: Extension<SqlitePool>,
) -> Result<Json<Power>, ApiError> {
    let id = path_id(id, POWER_NOT_FOUND)?;
    HeroRepo::get_power(&pool, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(POWER_NOT_FOUND))
}

#[utoipa::path(
    patch,
    path = "/powers/{id}",
    request_body = UpdatePowerRequest,
    params(("id" = i64, Path, description = "Power id")),
    responses(
        (status = 200, description = "Updated power.", body = Power),
        (status = 400, description = "Description missing, not a string, or shorter than 20 characters.", body = ErrorsBody),
        (status = 404, description = "Power not found or id not an integer.", body = ErrorBody),
    ),
    tag = "powers"
)]
#[instrument(skip(pool, payload))]
pub async fn update_power(
    id: Result<Path<i64>, PathRejection>,
    pool: Extension<SqlitePool>,
    payload: Option<Json<UpdatePowerRequest>>,
) -> Result<Json<Power>, ApiError> {
    let id = path_id(id, POWER_NOT_FOUND)?;
    let mut power = HeroRepo::get_power(&pool, id)
        .await?
        .ok_or(ApiError::NotFound(POWER_NOT_FOUND))?;

    // A JSON `null` deserializes to `None` and counts as absent.
    let Some(description) = payload.and_then(|Json(request)| request.description) else {
        return Err(ApiError::BadRequest(NO_VALID_FIELDS.to_string()));
    };

    let Value::String(description) = description else {
        debug!("Rejected non-string description for power {id}");
        return Err(ApiError::validation());
    };

    if let Err(err) = power.set_description(description) {
        debug!("Rejected description for power {id}: {err}");
        return Err(ApiError::validation());
    }

    match HeroRepo::update_power_description(&pool, &power).await {
        Ok(updated) => Ok(Json(updated)),
        Err(sqlx::Error::RowNotFound) => Err(ApiError::NotFound(POWER_NOT_FOUND)),
        Err(err) => Err(err.into()),
    }
}
