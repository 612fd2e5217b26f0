//! API handlers for the marketplace backend

pub mod auth;
pub mod products;
pub mod reviews;
pub mod users;

pub use auth::{telegram_login, verify};
pub use products::{
    create_product, delete_product, get_product, list_favorites, list_products, toggle_favorite,
    update_product,
};
pub use reviews::{seller_reviews, submit_report, submit_review};
pub use users::{get_user, health_check};

// Re-export AuthenticatedUser from middleware for handler use
pub use crate::middleware::auth::{AuthenticatedUser, OptionalUser};
