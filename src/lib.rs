pub mod appresult;
pub mod config;
pub mod db;
pub mod extract;
pub mod messages;
pub mod ownership;
pub mod people;
pub mod ping;
pub mod timestamp;
pub mod validate;

use axum::{extract::FromRef, http::{header, HeaderValue, Method}, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// Every route under `/api`, with request tracing. Unknown paths and methods
/// get JSON error bodies.
pub fn app(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/ping/", get(ping::ping))
        .merge(people::router())
        .merge(messages::router())
        .method_not_allowed_fallback(|method: Method| async move { AppError::method_not_allowed(&method) });

    Router::new()
        .nest("/api", api)
        .fallback(|| async { AppError::not_found() })
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub fn cors_layer(allow_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let origin = match allow_origin {
        Some(origin) => AllowOrigin::exact(HeaderValue::from_str(origin)?),
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}
