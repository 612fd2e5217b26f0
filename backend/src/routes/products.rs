//! Product and favorite route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::products::*;
use crate::state::AppState;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/products/:id/favorite", post(toggle_favorite))
        .route("/api/favorites", get(list_favorites))
}
