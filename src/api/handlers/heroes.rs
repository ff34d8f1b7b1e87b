use super::{path_id, ApiError, ErrorBody};
use crate::heroes::{Hero, HeroDetail, HeroRepo};
use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    Json,
};
use sqlx::SqlitePool;
use tracing::instrument;

pub const HERO_NOT_FOUND: &str = "Hero not found";

#[utoipa::path(
    get,
    path = "/heroes",
    responses(
        (status = 200, description = "All heroes, without their hero powers.", body = [Hero]),
    ),
    tag = "heroes"
)]
#[instrument(skip(pool))]
pub async fn list_heroes(pool: Extension<SqlitePool>) -> Result<Json<Vec<Hero>>, ApiError> {
    Ok(Json(HeroRepo::list_heroes(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/heroes/{id}",
    params(("id" = i64, Path, description = "Hero id")),
    responses(
        (status = 200, description = "Hero with its hero powers.", body = HeroDetail),
        (status = 404, description = "Hero not found.", body = ErrorBody),
    ),
    tag = "heroes"
)]
#[instrument(skip(pool))]
pub async fn get_hero(
    id: Result<Path<i64>, PathRejection>,
    pool: Extension<SqlitePool>,
) -> Result<Json<HeroDetail>, ApiError> {
    let id = path_id(id, HERO_NOT_FOUND)?;
    HeroRepo::get_hero_detail(&pool, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(HERO_NOT_FOUND))
}
