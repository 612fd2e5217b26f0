//! Business logic services for the marketplace

mod product;
pub mod rating;
mod report;
mod review;
mod user;

pub use product::{new_product, parse_filter, product_changes, ProductService};
pub use rating::{compute_seller_rating, update_seller_rating};
pub use report::ReportService;
pub use review::{parse_pagination, ReviewService, SellerReviews};
pub use user::UserService;
