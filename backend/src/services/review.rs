//! Seller review service

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    non_blank, CreateReviewRequest, NewReview, Pagination, RatingStats, Review,
    ReviewListQuery, ReviewWithRelations,
};
use crate::store::{MarketStore, StoreError};

use super::rating::update_seller_rating;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

const DUPLICATE_REVIEW: &str = "You have already reviewed this purchase";

/// Parse a pagination parameter; absent or empty means `default`
fn parse_page_param(value: Option<String>, name: &str, default: i64) -> ApiResult<i64> {
    match non_blank(value) {
        None => Ok(default),
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| ApiError::validation(format!("Invalid {}", name))),
    }
}

/// Page clamped to >= 1, limit clamped to 1..=50
pub fn parse_pagination(query: ReviewListQuery) -> ApiResult<(i64, i64)> {
    let page = parse_page_param(query.page, "page", DEFAULT_PAGE)?.max(1);
    let limit = parse_page_param(query.limit, "limit", DEFAULT_LIMIT)?.clamp(1, MAX_LIMIT);
    Ok((page, limit))
}

/// One page of a seller's reviews with the histogram of all their ratings
#[derive(Debug, Serialize)]
pub struct SellerReviews {
    pub reviews: Vec<ReviewWithRelations>,
    pub pagination: Pagination,
    pub stats: RatingStats,
}

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn MarketStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Store a buyer's review of a seller and refresh the seller's rating
    pub async fn submit_review(&self, buyer_id: Uuid, req: CreateReviewRequest) -> ApiResult<Review> {
        req.validate()?;

        let rating = req.rating.filter(|r| !r.is_blank());
        let (Some(seller_id), Some(rating)) = (req.seller_id, rating) else {
            return Err(ApiError::validation("Missing required fields"));
        };

        let rating = rating
            .to_integer()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| ApiError::validation("Rating must be between 1 and 5"))?;

        if seller_id == buyer_id {
            return Err(ApiError::validation("Cannot review yourself"));
        }

        if self.store.find_user(seller_id).await?.is_none() {
            return Err(ApiError::not_found("Seller not found"));
        }

        if let Some(product_id) = req.product_id {
            if self.store.product_owner(product_id).await?.is_none() {
                return Err(ApiError::not_found("Product not found"));
            }
            if self.store.review_exists(seller_id, buyer_id, product_id).await? {
                return Err(ApiError::validation(DUPLICATE_REVIEW));
            }
        }

        let review = NewReview {
            seller_id,
            buyer_id,
            product_id: req.product_id,
            rating: rating as i32,
            comment: non_blank(req.comment),
        };

        let created = match self.store.insert_review(&review).await {
            Ok(created) => created,
            Err(StoreError::UniqueViolation(_)) => {
                return Err(ApiError::validation(DUPLICATE_REVIEW))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            review_id = %created.id,
            seller_id = %seller_id,
            buyer_id = %buyer_id,
            rating = created.rating,
            "Review submitted"
        );

        update_seller_rating(self.store.as_ref(), seller_id).await;

        Ok(created)
    }

    pub async fn seller_reviews(
        &self,
        seller_id: Uuid,
        query: ReviewListQuery,
    ) -> ApiResult<SellerReviews> {
        let (page, limit) = parse_pagination(query)?;
        let offset = Pagination::offset(page, limit)
            .ok_or_else(|| ApiError::validation("Invalid page"))?;

        let (reviews, total) = self
            .store
            .list_seller_reviews(seller_id, limit, offset)
            .await?;
        let ratings = self.store.seller_ratings(seller_id).await?;

        Ok(SellerReviews {
            reviews,
            pagination: Pagination::new(page, limit, total),
            stats: RatingStats::from_ratings(&ratings),
        })
    }
}
