//! Product listing models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::{NumericInput, SellerSummary, UnknownVariant};

/// Product category
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "product_category", rename_all = "snake_case")]
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

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Main => "main",
            Category::Custom => "custom",
            Category::Premium => "premium",
            Category::Special => "special",
            Category::Sets => "sets",
        }
    }
}

/// How hard a casting is to find
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "product_rarity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Super Treasure Hunt (STH "stg" in collector slang)
    Stg,
    /// Treasure Hunt
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

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Stg => "stg",
            Rarity::Th => "th",
            Rarity::Main => "main",
            Rarity::Rare => "rare",
            Rarity::SuperTreasure => "super_treasure",
        }
    }
}

/// Physical condition of the item
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "product_condition", rename_all = "snake_case")]
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

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::NewInBox => "new_in_box",
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Used => "used",
            Condition::Damaged => "damaged",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for Rarity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for Condition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product row
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
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

/// Product joined with its seller, as returned by listing and detail routes
#[derive(Debug, Serialize, Clone)]
pub struct ProductWithSeller {
    #[serde(flatten)]
    pub product: Product,
    pub seller: SellerSummary,
    /// Whether the requesting user has this product in favorites
    pub is_favorite: bool,
}

/// Body of `POST /products`
///
/// Everything is optional at the serde level so that missing fields and
/// unknown enum values produce our own 400 messages.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub price: Option<NumericInput>,
    pub category: Option<String>,
    pub rarity: Option<String>,
    pub condition: Option<String>,
    pub year: Option<NumericInput>,
    #[validate(length(max = 10, message = "At most 10 images are allowed"))]
    pub images: Option<Vec<String>>,
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
    pub shipping_available: Option<bool>,
}

/// Body of `PUT /products/:id`; absent fields are left untouched
///
/// `null` reads the same as absent, so `description`, `location` and `year`
/// cannot be cleared once set. Send an empty string to blank the text fields.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub price: Option<NumericInput>,
    pub category: Option<String>,
    pub rarity: Option<String>,
    pub condition: Option<String>,
    pub year: Option<NumericInput>,
    #[validate(length(max = 10, message = "At most 10 images are allowed"))]
    pub images: Option<Vec<String>>,
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
    pub shipping_available: Option<bool>,
    pub active: Option<bool>,
}

/// Query string of `GET /products`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub rarity: Option<String>,
    pub seller_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
}

/// Validated listing filter; `None` fields apply no predicate
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub rarity: Option<Rarity>,
    pub seller_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

/// Validated product insert
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub rarity: Rarity,
    pub condition: Condition,
    pub year: Option<i32>,
    pub images: Vec<String>,
    pub location: Option<String>,
    pub shipping_available: bool,
}

/// Validated partial update
#[derive(Debug, Default, Clone)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<Category>,
    pub rarity: Option<Rarity>,
    pub condition: Option<Condition>,
    pub year: Option<i32>,
    pub images: Option<Vec<String>>,
    pub location: Option<String>,
    pub shipping_available: Option<bool>,
    pub active: Option<bool>,
}

impl ProductChanges {
    /// Apply onto an existing row (used by the in-memory store)
    pub fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(rarity) = self.rarity {
            product.rarity = rarity;
        }
        if let Some(condition) = self.condition {
            product.condition = condition;
        }
        if let Some(year) = self.year {
            product.year = Some(year);
        }
        if let Some(images) = &self.images {
            product.images = images.clone();
        }
        if let Some(location) = &self.location {
            product.location = Some(location.clone());
        }
        if let Some(shipping_available) = self.shipping_available {
            product.shipping_available = shipping_available;
        }
        if let Some(active) = self.active {
            product.active = active;
        }
    }
}

impl ProductFilter {
    /// Evaluate the filter against a row (used by the in-memory store)
    pub fn matches(&self, product: &Product) -> bool {
        if !product.active {
            return false;
        }
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }
        if self.rarity.is_some_and(|r| r != product.rarity) {
            return false;
        }
        if self.seller_id.is_some_and(|s| s != product.seller_id) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if let Some(search) = &self.search {
            return product
                .title
                .to_lowercase()
                .contains(&search.to_lowercase());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        for rarity in Rarity::ALL {
            assert_eq!(rarity.as_str().parse::<Rarity>().unwrap(), rarity);
        }
        for condition in Condition::ALL {
            assert_eq!(condition.as_str().parse::<Condition>().unwrap(), condition);
        }
    }

    #[test]
    fn test_enum_rejects_unknown_values() {
        assert!("vintage".parse::<Category>().is_err());
        assert!("Main".parse::<Category>().is_err());
        assert!("legendary".parse::<Rarity>().is_err());
        assert!("mint".parse::<Condition>().is_err());
    }

    #[test]
    fn test_enum_serde_matches_storage_names() {
        assert_eq!(
            serde_json::to_string(&Rarity::SuperTreasure).unwrap(),
            "\"super_treasure\""
        );
        assert_eq!(
            serde_json::to_string(&Condition::NewInBox).unwrap(),
            "\"new_in_box\""
        );
    }

    #[test]
    fn test_create_request_uses_camel_case() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"title":"Custom '67 Camaro","price":"45.00","shippingAvailable":true}"#,
        )
        .unwrap();
        assert_eq!(req.shipping_available, Some(true));
        assert_eq!(req.title.as_deref(), Some("Custom '67 Camaro"));
    }
}
