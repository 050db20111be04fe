//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: storage wiring and the transactional fruit operations
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request payload decoding
//! - `errors.rs`: the JSON error envelope

use axum::{http::HeaderValue, routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fruitstand_infra::{AppConfig, StoreError};
use fruitstand_observability::{LogFormat, ParseLogFormatError};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, StoreError> {
    let services = services::build_services(&config.storage).await?;
    Ok(build_router(services, &config.cors_origins))
}

/// Log format selected by `LOG_FORMAT`, JSON when unset.
pub fn log_format(config: &AppConfig) -> Result<LogFormat, ParseLogFormatError> {
    config
        .log_format
        .as_deref()
        .map(str::parse::<LogFormat>)
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Build the router around an already constructed storage handle.
pub fn build_router(services: AppServices, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
}

/// Permissive CORS when no origins are configured, an allow-list otherwise.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
