//! Top-level router combining the API and static files.
//!
//! # Route Structure
//!
//! - `/api/v1/*` - REST API (see [`crate::api::routes`])
//! - `/*`        - Static files from `public/`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on `/api/v1/auth`
//! - **Access gate** - Per-route `authenticate`/`authorize` layers
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::error::AppError;
use crate::state::AppState;

/// Prefix of every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so serve the result with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = Router::new()
        .merge(api::routes::resource_routes(&state).layer(rate_limit::layer()))
        .nest(
            "/auth",
            api::routes::auth_routes(&state).layer(rate_limit::secure_layer()),
        )
        .route("/health", get(health_handler));

    let router = mount(api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Mounts `api_router` under [`API_PREFIX`] with a JSON 404 for unknown API
/// paths; everything else is served from `public/`.
pub fn mount(api_router: Router<AppState>) -> Router<AppState> {
    Router::new()
        .nest(API_PREFIX, api_router.fallback(api_not_found))
        .fallback_service(ServeDir::new("public"))
}

async fn api_not_found() -> AppError {
    AppError::not_found("Route not found")
}
