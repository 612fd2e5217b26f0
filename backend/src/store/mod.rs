//! Persistence layer
//!
//! Services talk to a [`MarketStore`]; [`PgStore`] is the production
//! implementation and [`MemoryStore`] keeps the same tables in process for
//! demos and router tests. Lookups return `Option` and leave the not-found
//! decision to the caller.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    NewProduct, NewReport, NewReview, Product, ProductChanges, ProductFilter, ProductWithSeller,
    Report, Review, ReviewWithRelations, TelegramProfile, User,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(String),

    /// A unique constraint rejected the write (SQLSTATE 23505)
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(db_err.message().to_string());
            }
        }
        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Connectivity probe for `/health`
    async fn ping(&self) -> StoreResult<()>;

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Create the user on first login, refresh the Telegram profile fields after
    async fn upsert_telegram_user(&self, profile: &TelegramProfile) -> StoreResult<User>;

    async fn update_user_rating(
        &self,
        user_id: Uuid,
        rating: Decimal,
        reviews_count: i32,
    ) -> StoreResult<()>;

    /// Active products matching the filter, newest first
    async fn list_products(
        &self,
        filter: &ProductFilter,
        viewer: Option<Uuid>,
    ) -> StoreResult<Vec<ProductWithSeller>>;

    /// Increment the view counter and return the product as it is afterwards
    async fn record_product_view(
        &self,
        product_id: Uuid,
        viewer: Option<Uuid>,
    ) -> StoreResult<Option<ProductWithSeller>>;

    async fn product_owner(&self, product_id: Uuid) -> StoreResult<Option<Uuid>>;

    async fn insert_product(&self, product: &NewProduct) -> StoreResult<Product>;

    /// Apply changes if the product exists and belongs to `seller_id`
    async fn update_product(
        &self,
        product_id: Uuid,
        seller_id: Uuid,
        changes: &ProductChanges,
    ) -> StoreResult<Option<Product>>;

    async fn delete_product(&self, product_id: Uuid, seller_id: Uuid) -> StoreResult<bool>;

    /// Returns true if the product is now a favorite
    async fn toggle_favorite(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<bool>;

    /// Favorited products, most recently favorited first
    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<ProductWithSeller>>;

    async fn review_exists(
        &self,
        seller_id: Uuid,
        buyer_id: Uuid,
        product_id: Uuid,
    ) -> StoreResult<bool>;

    async fn insert_review(&self, review: &NewReview) -> StoreResult<Review>;

    /// One page of a seller's reviews, newest first, with the total count
    async fn list_seller_reviews(
        &self,
        seller_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<ReviewWithRelations>, i64)>;

    /// Every rating the seller has received
    async fn seller_ratings(&self, seller_id: Uuid) -> StoreResult<Vec<i32>>;

    async fn insert_report(&self, report: &NewReport) -> StoreResult<Report>;
}
