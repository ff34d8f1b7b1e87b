use super::{heroes::HERO_NOT_FOUND, powers::POWER_NOT_FOUND, ApiError, ErrorsBody};
use crate::heroes::{validation::validate_strength, HeroPower, HeroPowerError, HeroRepo};
use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

pub const IDS_REQUIRED: &str = "Hero ID and Power ID are required";
pub const CREATE_FAILED: &str = "Failed to create HeroPower";

/// Documented shape of the `POST /hero_powers` body. The handler reads the raw
/// JSON object so that ids of the wrong type answer 404 instead of a
/// deserialization error.
#[derive(Debug, ToSchema)]
pub struct CreateHeroPowerRequest {
    /// One of `Strong`, `Weak` or `Average`.
    pub strength: String,
    /// Integer id, or a string holding one.
    pub hero_id: i64,
    /// Integer id, or a string holding one.
    pub power_id: i64,
}

/// Reads an id the way the store would compare it: integers, or strings that
/// parse as one. Anything else can never match a row.
fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[utoipa::path(
    post,
    path = "/hero_powers",
    request_body = CreateHeroPowerRequest,
    responses(
        (status = 201, description = "Hero power created.", body = HeroPower),
        (status = 400, description = "Invalid strength, missing ids, or the store refused the row.", body = ErrorsBody),
        (status = 404, description = "Referenced hero or power not found.", body = ErrorsBody),
    ),
    tag = "hero_powers"
)]
/// Links a hero to a power with a strength rating.
///
/// Checks run in order: strength, ids present, hero exists, power exists. The
/// insert itself runs in a transaction that is rolled back on any failure.
#[instrument(skip(pool, payload))]
pub async fn create_hero_power(
    pool: Extension<SqlitePool>,
    payload: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<HeroPower>), ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::validation());
    };

    let Some(strength) = request
        .get("strength")
        .and_then(Value::as_str)
        .filter(|strength| validate_strength(strength).is_ok())
    else {
        return Err(ApiError::validation());
    };

    let (Some(hero_id), Some(power_id)) = (request.get("hero_id"), request.get("power_id")) else {
        return Err(ApiError::BadRequest(IDS_REQUIRED.to_string()));
    };

    let Some(hero_id) = parse_id(hero_id) else {
        debug!("Unusable hero_id: {hero_id}");
        return Err(ApiError::MissingReference(HERO_NOT_FOUND));
    };
    if HeroRepo::get_hero(&pool, hero_id).await?.is_none() {
        return Err(ApiError::MissingReference(HERO_NOT_FOUND));
    }

    let Some(power_id) = parse_id(power_id) else {
        debug!("Unusable power_id: {power_id}");
        return Err(ApiError::MissingReference(POWER_NOT_FOUND));
    };
    if HeroRepo::get_power(&pool, power_id).await?.is_none() {
        return Err(ApiError::MissingReference(POWER_NOT_FOUND));
    }

    match HeroRepo::create_hero_power(&pool, strength, hero_id, power_id).await {
        Ok(hero_power) => {
            info!(
                "Created hero power {} (hero {hero_id}, power {power_id})",
                hero_power.id
            );
            Ok((StatusCode::CREATED, Json(hero_power)))
        }
        Err(HeroPowerError::Validation(err)) => Err(ApiError::BadRequest(err.to_string())),
        Err(HeroPowerError::Database(err)) => {
            error!("Failed to create hero power: {err}");
            Err(ApiError::BadRequest(CREATE_FAILED.to_string()))
        }
    }
}
