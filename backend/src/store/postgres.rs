//! PostgreSQL store

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{MarketStore, StoreResult};
use crate::models::{
    BuyerSummary, NewProduct, NewReport, NewReview, Product, ProductChanges, ProductFilter,
    ProductSummary, ProductWithSeller, Report, Review, ReviewWithRelations, SellerSummary,
    TelegramProfile, User,
};

/// Seller columns appended to every product select; `is_favorite` is bound separately
const SELLER_COLUMNS: &str = "u.first_name AS seller_first_name, \
     u.last_name AS seller_last_name, \
     u.username AS seller_username, \
     u.photo_url AS seller_photo_url, \
     u.rating AS seller_rating, \
     u.reviews_count AS seller_reviews_count, \
     u.successful_sales AS seller_successful_sales";

#[derive(sqlx::FromRow)]
struct ProductRow {
    #[sqlx(flatten)]
    product: Product,
    seller_first_name: String,
    seller_last_name: Option<String>,
    seller_username: Option<String>,
    seller_photo_url: Option<String>,
    seller_rating: Decimal,
    seller_reviews_count: i32,
    seller_successful_sales: i32,
    is_favorite: bool,
}

impl From<ProductRow> for ProductWithSeller {
    fn from(row: ProductRow) -> Self {
        let seller = SellerSummary {
            id: row.product.seller_id,
            first_name: row.seller_first_name,
            last_name: row.seller_last_name,
            username: row.seller_username,
            photo_url: row.seller_photo_url,
            rating: row.seller_rating,
            reviews_count: row.seller_reviews_count,
            successful_sales: row.seller_successful_sales,
        };
        ProductWithSeller {
            product: row.product,
            seller,
            is_favorite: row.is_favorite,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    #[sqlx(flatten)]
    review: Review,
    buyer_first_name: String,
    buyer_last_name: Option<String>,
    buyer_username: Option<String>,
    buyer_photo_url: Option<String>,
    product_title: Option<String>,
    product_images: Option<Vec<String>>,
}

impl From<ReviewRow> for ReviewWithRelations {
    fn from(row: ReviewRow) -> Self {
        let buyer = BuyerSummary {
            id: row.review.buyer_id,
            first_name: row.buyer_first_name,
            last_name: row.buyer_last_name,
            username: row.buyer_username,
            photo_url: row.buyer_photo_url,
        };
        let product = match (row.review.product_id, row.product_title) {
            (Some(id), Some(title)) => Some(ProductSummary {
                id,
                title,
                images: row.product_images.unwrap_or_default(),
            }),
            _ => None,
        };
        ReviewWithRelations {
            review: row.review,
            buyer,
            product,
        }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

impl PgStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }

    fn product_select(viewer: Option<Uuid>) -> QueryBuilder<'static, Postgres> {
        let mut query_builder = QueryBuilder::new("SELECT p.*, ");
        query_builder.push(SELLER_COLUMNS);
        query_builder.push(
            ", EXISTS (SELECT 1 FROM favorites f WHERE f.product_id = p.id AND f.user_id = ",
        );
        query_builder.push_bind(viewer);
        query_builder.push(") AS is_favorite FROM products p JOIN users u ON u.id = p.seller_id");
        query_builder
    }
}

#[async_trait]
impl MarketStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.db_pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(user)
    }

    async fn upsert_telegram_user(&self, profile: &TelegramProfile) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, first_name, last_name, username, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (telegram_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                username = EXCLUDED.username,
                photo_url = EXCLUDED.photo_url
            RETURNING *
            "#,
        )
        .bind(profile.telegram_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.username)
        .bind(&profile.photo_url)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(user)
    }

    async fn update_user_rating(
        &self,
        user_id: Uuid,
        rating: Decimal,
        reviews_count: i32,
    ) -> StoreResult<()> {
        sqlx::query("UPDATE users SET rating = $2, reviews_count = $3 WHERE id = $1")
            .bind(user_id)
            .bind(rating)
            .bind(reviews_count)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        viewer: Option<Uuid>,
    ) -> StoreResult<Vec<ProductWithSeller>> {
        let mut query_builder = Self::product_select(viewer);
        query_builder.push(" WHERE p.active = TRUE");

        if let Some(category) = filter.category {
            query_builder.push(" AND p.category = ");
            query_builder.push_bind(category);
        }

        if let Some(rarity) = filter.rarity {
            query_builder.push(" AND p.rarity = ");
            query_builder.push_bind(rarity);
        }

        if let Some(seller_id) = filter.seller_id {
            query_builder.push(" AND p.seller_id = ");
            query_builder.push_bind(seller_id);
        }

        if let Some(min_price) = filter.min_price {
            query_builder.push(" AND p.price >= ");
            query_builder.push_bind(min_price);
        }

        if let Some(max_price) = filter.max_price {
            query_builder.push(" AND p.price <= ");
            query_builder.push_bind(max_price);
        }

        if let Some(search) = &filter.search {
            query_builder.push(" AND p.title ILIKE ");
            query_builder.push_bind(format!("%{}%", escape_like(search)));
        }

        query_builder.push(" ORDER BY p.created_at DESC");

        let rows = query_builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(rows.into_iter().map(ProductWithSeller::from).collect())
    }

    async fn record_product_view(
        &self,
        product_id: Uuid,
        viewer: Option<Uuid>,
    ) -> StoreResult<Option<ProductWithSeller>> {
        let sql = format!(
            "WITH p AS (UPDATE products SET views = views + 1 WHERE id = $1 RETURNING *) \
             SELECT p.*, {SELLER_COLUMNS}, \
             EXISTS (SELECT 1 FROM favorites f WHERE f.product_id = p.id AND f.user_id = $2) AS is_favorite \
             FROM p JOIN users u ON u.id = p.seller_id"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id)
            .bind(viewer)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(row.map(ProductWithSeller::from))
    }

    async fn product_owner(&self, product_id: Uuid) -> StoreResult<Option<Uuid>> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT seller_id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(owner)
    }

    async fn insert_product(&self, product: &NewProduct) -> StoreResult<Product> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                title, description, price, category, rarity, condition, year,
                images, seller_id, location, shipping_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category)
        .bind(product.rarity)
        .bind(product.condition)
        .bind(product.year)
        .bind(&product.images)
        .bind(product.seller_id)
        .bind(&product.location)
        .bind(product.shipping_available)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(created)
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        seller_id: Uuid,
        changes: &ProductChanges,
    ) -> StoreResult<Option<Product>> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                category = COALESCE($6, category),
                rarity = COALESCE($7, rarity),
                condition = COALESCE($8, condition),
                year = COALESCE($9, year),
                images = COALESCE($10, images),
                location = COALESCE($11, location),
                shipping_available = COALESCE($12, shipping_available),
                active = COALESCE($13, active),
                updated_at = NOW()
            WHERE id = $1 AND seller_id = $2
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(seller_id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.category)
        .bind(changes.rarity)
        .bind(changes.condition)
        .bind(changes.year)
        .bind(&changes.images)
        .bind(&changes.location)
        .bind(changes.shipping_available)
        .bind(changes.active)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(updated)
    }

    async fn delete_product(&self, product_id: Uuid, seller_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND seller_id = $2")
            .bind(product_id)
            .bind(seller_id)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_favorite(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<bool> {
        let removed = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.db_pool)
            .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO favorites (user_id, product_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&self.db_pool)
        .await?;

        Ok(true)
    }

    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<ProductWithSeller>> {
        let sql = format!(
            "SELECT p.*, {SELLER_COLUMNS}, TRUE AS is_favorite \
             FROM favorites f \
             JOIN products p ON p.id = f.product_id \
             JOIN users u ON u.id = p.seller_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.db_pool)
            .await?;
        Ok(rows.into_iter().map(ProductWithSeller::from).collect())
    }

    async fn review_exists(
        &self,
        seller_id: Uuid,
        buyer_id: Uuid,
        product_id: Uuid,
    ) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE seller_id = $1 AND buyer_id = $2 AND product_id = $3)",
        )
        .bind(seller_id)
        .bind(buyer_id)
        .bind(product_id)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(exists)
    }

    async fn insert_review(&self, review: &NewReview) -> StoreResult<Review> {
        let created = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (seller_id, buyer_id, product_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(review.seller_id)
        .bind(review.buyer_id)
        .bind(review.product_id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(created)
    }

    async fn list_seller_reviews(
        &self,
        seller_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<ReviewWithRelations>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE seller_id = $1")
            .bind(seller_id)
            .fetch_one(&self.db_pool)
            .await?;

        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.*,
                b.first_name AS buyer_first_name,
                b.last_name AS buyer_last_name,
                b.username AS buyer_username,
                b.photo_url AS buyer_photo_url,
                pr.title AS product_title,
                pr.images AS product_images
            FROM reviews r
            JOIN users b ON b.id = r.buyer_id
            LEFT JOIN products pr ON pr.id = r.product_id
            WHERE r.seller_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(seller_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        Ok((rows.into_iter().map(ReviewWithRelations::from).collect(), total))
    }

    async fn seller_ratings(&self, seller_id: Uuid) -> StoreResult<Vec<i32>> {
        let ratings = sqlx::query_scalar::<_, i32>("SELECT rating FROM reviews WHERE seller_id = $1")
            .bind(seller_id)
            .fetch_all(&self.db_pool)
            .await?;
        Ok(ratings)
    }

    async fn insert_report(&self, report: &NewReport) -> StoreResult<Report> {
        let created = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (reporter_id, reported_user_id, product_id, reason, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(report.reporter_id)
        .bind(report.reported_user_id)
        .bind(report.product_id)
        .bind(report.reason)
        .bind(&report.description)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(created)
    }
}
