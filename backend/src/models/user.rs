//! User models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// Rating a seller starts with before any review is left
pub const DEFAULT_SELLER_RATING: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// User row
///
/// `rating` and `reviews_count` are derived from the user's reviews and are
/// only written by the rating aggregator.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub rating: Decimal,
    pub reviews_count: i32,
    pub successful_sales: i32,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user (sanitized for API)
#[derive(Debug, Serialize, Clone)]
pub struct UserProfile {
    pub id: Uuid,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub rating: Decimal,
    pub reviews_count: i32,
    pub successful_sales: i32,
    pub joined_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            photo_url: user.photo_url,
            rating: user.rating,
            reviews_count: user.reviews_count,
            successful_sales: user.successful_sales,
            joined_at: user.created_at,
        }
    }
}

/// Seller block embedded in product listings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SellerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub rating: Decimal,
    pub reviews_count: i32,
    pub successful_sales: i32,
}

impl From<&User> for SellerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            photo_url: user.photo_url.clone(),
            rating: user.rating,
            reviews_count: user.reviews_count,
            successful_sales: user.successful_sales,
        }
    }
}

/// Buyer block embedded in seller reviews
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BuyerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&User> for BuyerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}

/// Identity fields taken from Telegram on every login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramProfile {
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rating_is_five() {
        assert_eq!(DEFAULT_SELLER_RATING.to_string(), "5.00");
    }
}
