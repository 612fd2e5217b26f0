//! Review and report route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::reviews::*;
use crate::state::AppState;

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", post(submit_review))
        .route("/api/reviews/seller/:seller_id", get(seller_reviews))
        .route("/api/reviews/report", post(submit_report))
}
