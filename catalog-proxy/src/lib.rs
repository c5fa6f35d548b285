//! Thin HTTP proxy in front of the catalog backend.
//!
//! `GET /` answers with a fixed status message; `GET /backend` forwards a
//! single GET to the configured backend and relays its JSON body, or a
//! `{"error": ...}` envelope with 500 when the call fails.

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

pub use config::{ConfigError, ProxyConfig};
pub use error::{ErrorEnvelope, ProxyError};
pub use routes::{ProxyState, StatusResponse, STATUS_MESSAGE};

use logging::api_logging_middleware;

pub fn create_proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/", get(routes::status))
        .route("/backend", get(routes::forward_to_backend))
        .with_state(state)
        .layer(middleware::from_fn(api_logging_middleware))
}

/// Router plus the layers driven by configuration.
pub fn build_app(config: &ProxyConfig) -> Result<Router, ProxyError> {
    let state = ProxyState::new(config)?;
    let router = create_proxy_router(state);

    if config.permissive_cors {
        Ok(router.layer(CorsLayer::permissive()))
    } else {
        Ok(router)
    }
}
