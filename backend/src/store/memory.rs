//! In-process store
//!
//! Rows live in insertion-ordered vectors behind one `RwLock`, so "newest
//! first" is reverse iteration and every operation sees a consistent snapshot.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MarketStore, StoreError, StoreResult};
use crate::models::{
    BuyerSummary, NewProduct, NewReport, NewReview, Product, ProductChanges, ProductFilter,
    ProductSummary, ProductWithSeller, Report, ReportStatus, Review, ReviewWithRelations,
    SellerSummary, TelegramProfile, User, DEFAULT_SELLER_RATING,
};

/// Favorites are kept in the order they were added
struct Favorite {
    user_id: Uuid,
    product_id: Uuid,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    favorites: Vec<Favorite>,
    reviews: Vec<Review>,
    reports: Vec<Report>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn is_favorite(&self, user_id: Option<Uuid>, product_id: Uuid) -> bool {
        user_id.is_some_and(|user_id| {
            self.favorites
                .iter()
                .any(|f| f.user_id == user_id && f.product_id == product_id)
        })
    }

    fn with_seller(&self, product: &Product, viewer: Option<Uuid>) -> Option<ProductWithSeller> {
        let seller = self.user(product.seller_id)?;
        Some(ProductWithSeller {
            product: product.clone(),
            seller: SellerSummary::from(seller),
            is_favorite: self.is_favorite(viewer, product.id),
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a user's ban flag; moderation has no HTTP surface
    pub async fn set_banned(&self, user_id: Uuid, banned: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.is_banned = banned;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn upsert_telegram_user(&self, profile: &TelegramProfile) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if let Some(user) = tables
            .users
            .iter_mut()
            .find(|u| u.telegram_id == profile.telegram_id)
        {
            user.first_name = profile.first_name.clone();
            user.last_name = profile.last_name.clone();
            user.username = profile.username.clone();
            user.photo_url = profile.photo_url.clone();
            return Ok(user.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            telegram_id: profile.telegram_id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            username: profile.username.clone(),
            photo_url: profile.photo_url.clone(),
            rating: DEFAULT_SELLER_RATING,
            reviews_count: 0,
            successful_sales: 0,
            is_banned: false,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user_rating(
        &self,
        user_id: Uuid,
        rating: Decimal,
        reviews_count: i32,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.rating = rating;
            user.reviews_count = reviews_count;
        }
        Ok(())
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        viewer: Option<Uuid>,
    ) -> StoreResult<Vec<ProductWithSeller>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .rev()
            .filter(|p| filter.matches(p))
            .filter_map(|p| tables.with_seller(p, viewer))
            .collect())
    }

    async fn record_product_view(
        &self,
        product_id: Uuid,
        viewer: Option<Uuid>,
    ) -> StoreResult<Option<ProductWithSeller>> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables.products.iter_mut().find(|p| p.id == product_id) else {
            return Ok(None);
        };
        product.views += 1;
        let product = product.clone();
        Ok(tables.with_seller(&product, viewer))
    }

    async fn product_owner(&self, product_id: Uuid) -> StoreResult<Option<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.seller_id))
    }

    async fn insert_product(&self, product: &NewProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        if tables.user(product.seller_id).is_none() {
            return Err(StoreError::Database(
                "products.seller_id references a missing user".to_string(),
            ));
        }

        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category,
            rarity: product.rarity,
            condition: product.condition,
            year: product.year,
            images: product.images.clone(),
            seller_id: product.seller_id,
            location: product.location.clone(),
            shipping_available: product.shipping_available,
            active: true,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        seller_id: Uuid,
        changes: &ProductChanges,
    ) -> StoreResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables
            .products
            .iter_mut()
            .find(|p| p.id == product_id && p.seller_id == seller_id)
        else {
            return Ok(None);
        };
        changes.apply(product);
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, product_id: Uuid, seller_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables
            .products
            .retain(|p| !(p.id == product_id && p.seller_id == seller_id));
        if tables.products.len() == before {
            return Ok(false);
        }

        tables.favorites.retain(|f| f.product_id != product_id);
        for review in tables.reviews.iter_mut() {
            if review.product_id == Some(product_id) {
                review.product_id = None;
            }
        }
        for report in tables.reports.iter_mut() {
            if report.product_id == Some(product_id) {
                report.product_id = None;
            }
        }
        Ok(true)
    }

    async fn toggle_favorite(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|f| !(f.user_id == user_id && f.product_id == product_id));
        if tables.favorites.len() < before {
            return Ok(false);
        }

        if !tables.products.iter().any(|p| p.id == product_id) {
            return Err(StoreError::Database(
                "favorites.product_id references a missing product".to_string(),
            ));
        }
        tables.favorites.push(Favorite {
            user_id,
            product_id,
        });
        Ok(true)
    }

    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<ProductWithSeller>> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| tables.products.iter().find(|p| p.id == f.product_id))
            .filter_map(|p| tables.with_seller(p, Some(user_id)))
            .collect())
    }

    async fn review_exists(
        &self,
        seller_id: Uuid,
        buyer_id: Uuid,
        product_id: Uuid,
    ) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().any(|r| {
            r.seller_id == seller_id && r.buyer_id == buyer_id && r.product_id == Some(product_id)
        }))
    }

    async fn insert_review(&self, review: &NewReview) -> StoreResult<Review> {
        let mut tables = self.tables.write().await;

        if let Some(product_id) = review.product_id {
            let duplicate = tables.reviews.iter().any(|r| {
                r.seller_id == review.seller_id
                    && r.buyer_id == review.buyer_id
                    && r.product_id == Some(product_id)
            });
            if duplicate {
                return Err(StoreError::UniqueViolation("uq_reviews_purchase".to_string()));
            }
        }

        let created = Review {
            id: Uuid::new_v4(),
            seller_id: review.seller_id,
            buyer_id: review.buyer_id,
            product_id: review.product_id,
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.push(created.clone());
        Ok(created)
    }

    async fn list_seller_reviews(
        &self,
        seller_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<ReviewWithRelations>, i64)> {
        let tables = self.tables.read().await;
        let matching: Vec<&Review> = tables
            .reviews
            .iter()
            .rev()
            .filter(|r| r.seller_id == seller_id)
            .collect();
        let total = matching.len() as i64;

        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .filter_map(|review| {
                let buyer = tables.user(review.buyer_id)?;
                let product = review.product_id.and_then(|id| {
                    tables
                        .products
                        .iter()
                        .find(|p| p.id == id)
                        .map(|p| ProductSummary {
                            id: p.id,
                            title: p.title.clone(),
                            images: p.images.clone(),
                        })
                });
                Some(ReviewWithRelations {
                    review: review.clone(),
                    buyer: BuyerSummary::from(buyer),
                    product,
                })
            })
            .collect();

        Ok((page, total))
    }

    async fn seller_ratings(&self, seller_id: Uuid) -> StoreResult<Vec<i32>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.seller_id == seller_id)
            .map(|r| r.rating)
            .collect())
    }

    async fn insert_report(&self, report: &NewReport) -> StoreResult<Report> {
        let mut tables = self.tables.write().await;
        let created = Report {
            id: Uuid::new_v4(),
            reporter_id: report.reporter_id,
            reported_user_id: report.reported_user_id,
            product_id: report.product_id,
            reason: report.reason,
            description: report.description.clone(),
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        };
        tables.reports.push(created.clone());
        Ok(created)
    }
}
