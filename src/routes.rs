//! Route registration
//! Assembles the API routes and applies middleware layers

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{handlers, middleware::AppState};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Probes
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // Authentication endpoints. Logout is deliberately outside any auth
    // requirement: clearing cookies is unconditional and idempotent.
    let auth_routes = Router::new()
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/refresh", post(handlers::auth::refresh))
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .route("/api/v1/auth/me", get(handlers::auth::me));

    let mut router = Router::new().merge(public_routes).merge(auth_routes);

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }

    router
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}

/// CORS layer for browser clients. Credentials are enabled so the session
/// cookies travel cross-origin, which requires explicit origins.
fn cors_layer(config: &crate::config::AppConfig) -> Option<CorsLayer> {
    if config.cors.allowed_origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
