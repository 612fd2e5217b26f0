//! User route definitions

use axum::{routing::get, Router};

use crate::handlers::users::{get_user, health_check};
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/:id", get(get_user))
        .route("/health", get(health_check))
}
