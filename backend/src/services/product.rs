//! Product listing service

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    non_blank, Category, Condition, CreateProductRequest, NewProduct, NumericInput, Product,
    ProductChanges, ProductFilter, ProductListQuery, ProductWithSeller, Rarity,
    UpdateProductRequest,
};
use crate::store::MarketStore;

/// Largest value a NUMERIC(12, 2) price column holds
const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

fn parse_enum<T: FromStr>(value: &str, message: &str) -> ApiResult<T> {
    value.parse::<T>().map_err(|_| ApiError::validation(message))
}

fn parse_price(value: &NumericInput) -> ApiResult<Decimal> {
    let price = value
        .to_decimal()
        .ok_or_else(|| ApiError::validation("Invalid price"))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(ApiError::validation("Price must be non-negative"));
    }

    let price = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if price > MAX_PRICE {
        return Err(ApiError::validation("Price is too large"));
    }
    Ok(price)
}

/// Empty strings from untouched form inputs count as "no year"
fn parse_year(value: Option<&NumericInput>) -> ApiResult<Option<i32>> {
    match value {
        None => Ok(None),
        Some(v) if v.is_blank() => Ok(None),
        Some(v) => v
            .to_integer()
            .and_then(|y| i32::try_from(y).ok())
            .map(Some)
            .ok_or_else(|| ApiError::validation("Invalid year")),
    }
}

fn parse_price_filter(value: Option<String>, name: &str) -> ApiResult<Option<Decimal>> {
    non_blank(value)
        .map(|v| {
            Decimal::from_str(&v).map_err(|_| ApiError::validation(format!("Invalid {}", name)))
        })
        .transpose()
}

/// Turn the raw listing query into a typed filter
pub fn parse_filter(query: ProductListQuery) -> ApiResult<ProductFilter> {
    let category = non_blank(query.category)
        .map(|v| parse_enum::<Category>(&v, "Invalid category"))
        .transpose()?;

    let rarity = non_blank(query.rarity)
        .map(|v| parse_enum::<Rarity>(&v, "Invalid rarity"))
        .transpose()?;

    let seller_id = non_blank(query.seller_id)
        .map(|v| Uuid::parse_str(&v).map_err(|_| ApiError::validation("Invalid sellerId")))
        .transpose()?;

    Ok(ProductFilter {
        category,
        rarity,
        seller_id,
        min_price: parse_price_filter(query.min_price, "minPrice")?,
        max_price: parse_price_filter(query.max_price, "maxPrice")?,
        search: non_blank(query.search),
    })
}

/// Validate a create request into an insert owned by `seller_id`
pub fn new_product(seller_id: Uuid, req: CreateProductRequest) -> ApiResult<NewProduct> {
    req.validate()?;

    let title = non_blank(req.title);
    let price = req.price.filter(|p| !p.is_blank());
    let category = non_blank(req.category);
    let rarity = non_blank(req.rarity);
    let condition = non_blank(req.condition);

    let (Some(title), Some(price), Some(category), Some(rarity), Some(condition)) =
        (title, price, category, rarity, condition)
    else {
        return Err(ApiError::validation("Missing required fields"));
    };

    Ok(NewProduct {
        seller_id,
        title,
        description: non_blank(req.description),
        price: parse_price(&price)?,
        category: parse_enum(&category, "Invalid category")?,
        rarity: parse_enum(&rarity, "Invalid rarity")?,
        condition: parse_enum::<Condition>(&condition, "Invalid condition")?,
        year: parse_year(req.year.as_ref())?,
        images: req.images.unwrap_or_default(),
        location: non_blank(req.location),
        shipping_available: req.shipping_available.unwrap_or(false),
    })
}

/// Validate an update request; absent fields stay untouched
pub fn product_changes(req: UpdateProductRequest) -> ApiResult<ProductChanges> {
    req.validate()?;

    let title = match req.title {
        Some(title) if title.trim().is_empty() => {
            return Err(ApiError::validation("Title cannot be empty"))
        }
        Some(title) => Some(title.trim().to_string()),
        None => None,
    };

    Ok(ProductChanges {
        title,
        description: req.description,
        price: req.price.as_ref().map(parse_price).transpose()?,
        category: req
            .category
            .map(|v| parse_enum(&v, "Invalid category"))
            .transpose()?,
        rarity: req
            .rarity
            .map(|v| parse_enum(&v, "Invalid rarity"))
            .transpose()?,
        condition: req
            .condition
            .map(|v| parse_enum(&v, "Invalid condition"))
            .transpose()?,
        year: parse_year(req.year.as_ref())?,
        images: req.images,
        location: req.location,
        shipping_available: req.shipping_available,
        active: req.active,
    })
}

/// Product service
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn MarketStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// List active products; `viewer` marks their favorites
    pub async fn list_products(
        &self,
        query: ProductListQuery,
        viewer: Option<Uuid>,
    ) -> ApiResult<Vec<ProductWithSeller>> {
        let filter = parse_filter(query)?;
        Ok(self.store.list_products(&filter, viewer).await?)
    }

    /// Fetch a product, counting the view
    pub async fn get_product(
        &self,
        product_id: Uuid,
        viewer: Option<Uuid>,
    ) -> ApiResult<ProductWithSeller> {
        self.store
            .record_product_view(product_id, viewer)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))
    }

    pub async fn create_product(
        &self,
        seller_id: Uuid,
        req: CreateProductRequest,
    ) -> ApiResult<Product> {
        let product = new_product(seller_id, req)?;
        let created = self.store.insert_product(&product).await?;

        tracing::info!(
            product_id = %created.id,
            seller_id = %seller_id,
            category = %created.category,
            "Product created"
        );

        Ok(created)
    }

    /// Ownership is checked before any change is applied
    async fn ensure_owner(&self, product_id: Uuid, user_id: Uuid, action: &str) -> ApiResult<()> {
        let owner = self
            .store
            .product_owner(product_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))?;

        if owner != user_id {
            return Err(ApiError::forbidden(format!(
                "Not authorized to {} this product",
                action
            )));
        }
        Ok(())
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        req: UpdateProductRequest,
    ) -> ApiResult<Product> {
        self.ensure_owner(product_id, user_id, "update").await?;
        let changes = product_changes(req)?;

        let updated = self
            .store
            .update_product(product_id, user_id, &changes)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))?;

        tracing::info!(product_id = %product_id, "Product updated");

        Ok(updated)
    }

    pub async fn delete_product(&self, product_id: Uuid, user_id: Uuid) -> ApiResult<()> {
        self.ensure_owner(product_id, user_id, "delete").await?;

        if !self.store.delete_product(product_id, user_id).await? {
            return Err(ApiError::not_found("Product not found"));
        }

        tracing::info!(product_id = %product_id, "Product deleted");

        Ok(())
    }

    /// Returns true when the product is now in the user's favorites
    pub async fn toggle_favorite(&self, user_id: Uuid, product_id: Uuid) -> ApiResult<bool> {
        if self.store.product_owner(product_id).await?.is_none() {
            return Err(ApiError::not_found("Product not found"));
        }

        let favorited = self.store.toggle_favorite(user_id, product_id).await?;

        tracing::debug!(user_id = %user_id, product_id = %product_id, favorited, "Favorite toggled");

        Ok(favorited)
    }

    pub async fn list_favorites(&self, user_id: Uuid) -> ApiResult<Vec<ProductWithSeller>> {
        Ok(self.store.list_favorites(user_id).await?)
    }
}
