pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod services;
pub mod validation;

use crate::config::{Config, StorageBackend};
use crate::db::{SharedStore, memory::MemoryStore, repositories::PgStore};
use crate::db::models::api::ErrorResponse;
use crate::error::AppResult;
use crate::middleware::TokenService;
use axum::{
    Router,
    http::{HeaderValue, Method, Response, StatusCode, header},
    middleware::from_fn,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<Config>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        let tokens = TokenService::new(&config.auth());
        Self {
            store,
            config: Arc::new(config),
            tokens,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let level_filter = match config.log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => config.log_level.as_str(),
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

/// Opens the configured backend. Postgres gets its tables created on the way.
pub fn build_store(config: &Config) -> AppResult<SharedStore> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = db::build_pool(&config.database()?)?;
            db::init_schema(&pool)?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    routes::create_router(state)
        .layer(from_fn(middleware::logger::logger))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<String> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    let body = serde_json::to_string(&ErrorResponse::internal_error())
        .unwrap_or_else(|_| r#"{"success":false,"error":"Internal server error"}"#.to_string());

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
