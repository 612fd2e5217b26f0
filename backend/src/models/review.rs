//! Seller reviews

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::{BuyerSummary, NumericInput};

/// Review row
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub product_id: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product block embedded in a review
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductSummary {
    pub id: Uuid,
    pub title: String,
    pub images: Vec<String>,
}

/// Review with the buyer who wrote it and the product it concerns
#[derive(Debug, Serialize, Clone)]
pub struct ReviewWithRelations {
    #[serde(flatten)]
    pub review: Review,
    pub buyer: BuyerSummary,
    /// `None` when the review has no product or the product was deleted
    pub product: Option<ProductSummary>,
}

/// Body of `POST /reviews`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub seller_id: Option<Uuid>,
    pub rating: Option<NumericInput>,
    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
    pub product_id: Option<Uuid>,
}

/// Validated review insert
#[derive(Debug, Clone)]
pub struct NewReview {
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub product_id: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Histogram of a seller's ratings, keyed "1" to "5" on the wire
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RatingStats {
    #[serde(rename = "1")]
    pub one: u32,
    #[serde(rename = "2")]
    pub two: u32,
    #[serde(rename = "3")]
    pub three: u32,
    #[serde(rename = "4")]
    pub four: u32,
    #[serde(rename = "5")]
    pub five: u32,
}

impl RatingStats {
    /// Count ratings per star; values outside 1..=5 are ignored
    pub fn from_ratings(ratings: &[i32]) -> Self {
        let mut stats = RatingStats::default();
        for rating in ratings {
            match rating {
                1 => stats.one += 1,
                2 => stats.two += 1,
                3 => stats.three += 1,
                4 => stats.four += 1,
                5 => stats.five += 1,
                _ => {}
            }
        }
        stats
    }

    pub fn total(&self) -> u32 {
        self.one + self.two + self.three + self.four + self.five
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }

    /// Row offset of `page`; `None` when it does not fit in an i64
    pub fn offset(page: i64, limit: i64) -> Option<i64> {
        page.checked_sub(1)?.checked_mul(limit)
    }
}

/// Query string of `GET /reviews/seller/:sellerId`; parsed by the service
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}
