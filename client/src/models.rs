//! Wire types exchanged with the marketplace API
//!
//! Rows come back in snake_case; request bodies go out in camelCase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Main,
    Custom,
    Premium,
    Special,
    Sets,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Main,
        Category::Custom,
        Category::Premium,
        Category::Special,
        Category::Sets,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Stg,
    Th,
    Main,
    Rare,
    SuperTreasure,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Stg,
        Rarity::Th,
        Rarity::Main,
        Rarity::Rare,
        Rarity::SuperTreasure,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    NewInBox,
    Excellent,
    Good,
    Used,
    Damaged,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::NewInBox,
        Condition::Excellent,
        Condition::Good,
        Condition::Used,
        Condition::Damaged,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Scam,
    FakeProduct,
    WrongDescription,
    BadBehavior,
    Spam,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 6] = [
        ReportReason::Scam,
        ReportReason::FakeProduct,
        ReportReason::WrongDescription,
        ReportReason::BadBehavior,
        ReportReason::Spam,
        ReportReason::Other,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
    Rejected,
}

/// Public profile of a user, also the cached "current user"
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
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

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Seller {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub rating: Decimal,
    pub reviews_count: i32,
    pub successful_sales: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub rarity: Rarity,
    pub condition: Condition,
    pub year: Option<i32>,
    pub images: Vec<String>,
    pub seller_id: Uuid,
    pub location: Option<String>,
    pub shipping_available: bool,
    pub active: bool,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product as shown in the catalogue: with its seller and favorite flag
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Listing {
    #[serde(flatten)]
    pub product: Product,
    pub seller: Seller,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub product_id: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewBuyer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewProduct {
    pub id: Uuid,
    pub title: String,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewEntry {
    #[serde(flatten)]
    pub review: Review,
    pub buyer: ReviewBuyer,
    pub product: Option<ReviewProduct>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Histogram of a seller's ratings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
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

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SellerReviews {
    pub reviews: Vec<ReviewEntry>,
    pub pagination: Pagination,
    pub stats: RatingStats,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub reason: ReportReason,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Result of a favorite toggle
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub favorited: bool,
    pub message: String,
}

/// New listing
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub rarity: Rarity,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub shipping_available: bool,
}

impl ProductDraft {
    pub fn new(
        title: impl Into<String>,
        price: Decimal,
        category: Category,
        rarity: Rarity,
        condition: Condition,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            price,
            category,
            rarity,
            condition,
            year: None,
            images: Vec::new(),
            location: None,
            shipping_available: false,
        }
    }
}

/// Partial listing update; `None` fields are not sent
#[derive(Debug, Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub seller_id: Uuid,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub reported_user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub reason: ReportReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Catalogue filters; `None` fields are left out of the query
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductFilters {
    /// Overlay `update` onto these filters; fields it leaves `None` are kept
    pub fn merge(&mut self, update: ProductFilters) {
        if update.category.is_some() {
            self.category = update.category;
        }
        if update.rarity.is_some() {
            self.rarity = update.rarity;
        }
        if update.seller_id.is_some() {
            self.seller_id = update.seller_id;
        }
        if update.min_price.is_some() {
            self.min_price = update.min_price;
        }
        if update.max_price.is_some() {
            self.max_price = update.max_price;
        }
        if let Some(search) = update.search {
            self.search = Some(search).filter(|s| !s.trim().is_empty());
        }
    }
}
