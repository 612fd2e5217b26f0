//! Route definitions for the marketplace API
//!
//! Each resource contributes a `Router<AppState>`; [`build_router`] merges
//! them and applies the shared middleware stack.

mod auth;
mod products;
mod reviews;
mod users;

pub use auth::auth_routes;
pub use products::product_routes;
pub use reviews::review_routes;
pub use users::user_routes;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::HttpOptions;
use crate::error::ApiError;
use crate::middleware::{request_tracing, security_headers};
use crate::state::AppState;

/// Assemble the full application router
pub fn build_router(state: AppState, options: &HttpOptions) -> Router {
    let router = Router::new()
        .merge(auth_routes())
        .merge(product_routes())
        .merge(review_routes())
        .merge(user_routes())
        .with_state(state);

    // The Mini App front-end is served from the same origin when configured
    let router = match &options.static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Serving static files");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router.fallback(|| async { ApiError::not_found("Route not found") }),
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(configure_cors(options.cors_allowed_origins.as_deref()))
            .layer(axum::middleware::from_fn(request_tracing))
            .layer(axum::middleware::from_fn(security_headers)),
    )
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins.filter(|s| !s.trim().is_empty()) else {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
