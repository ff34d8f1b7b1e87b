//! HTTP surface: router, middleware and the server loop.

use crate::heroes::db;
use anyhow::Result;
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
mod openapi;

pub use openapi::{openapi, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};

use handlers::{health, hero_powers, heroes, powers, root};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the application router over `pool`.
#[must_use]
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route("/heroes", get(heroes::list_heroes))
        .route("/heroes/:id", get(heroes::get_hero))
        .route("/powers", get(powers::list_powers))
        .route(
            "/powers/:id",
            get(powers::get_power).patch(powers::update_power),
        )
        .route("/hero_powers", post(hero_powers::create_hero_power))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(pool)),
        )
}

/// Start the server
/// # Errors
/// Return error if the database cannot be opened or migrated, or the listener fails
pub async fn new(port: u16, dsn: &str) -> Result<()> {
    let pool = db::connect(dsn).await?;
    db::migrate(&pool).await?;

    let app = router(pool.clone());

    let listener = TcpListener::bind(format!("[::]:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        // keep serving; the process can still be killed
        std::future::pending::<()>().await;
    }
    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
