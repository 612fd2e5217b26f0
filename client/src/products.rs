//! Catalogue, favorites, reviews and reports

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::auth::AuthManager;
use crate::error::ClientResult;
use crate::models::{
    FavoriteToggle, Listing, Product, ProductDraft, ProductFilters, ProductUpdate, Report,
    ReportDraft, Review, ReviewDraft, SellerReviews, UserProfile,
};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Debug, Clone)]
struct BrowseState {
    filters: ProductFilters,
    page: u32,
    page_size: u32,
}

#[derive(Serialize)]
struct ListingQuery<'a> {
    #[serde(flatten)]
    filters: &'a ProductFilters,
    page: u32,
    limit: u32,
}

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct ListingsEnvelope {
    products: Vec<Listing>,
}

#[derive(Deserialize)]
struct ListingEnvelope {
    product: Listing,
}

#[derive(Deserialize)]
struct MutationEnvelope {
    product: Product,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: String,
}

#[derive(Deserialize)]
struct ReviewEnvelope {
    review: Review,
}

#[derive(Deserialize)]
struct ReportEnvelope {
    report: Report,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// Browses and edits the catalogue on behalf of the current session
///
/// Filters accumulate across [`load_products`](Self::load_products) calls
/// the way the catalogue screen keeps them while the user refines a search.
pub struct ProductManager {
    api: ApiClient,
    auth: Arc<AuthManager>,
    state: Mutex<BrowseState>,
}

impl ProductManager {
    pub fn new(api: ApiClient, auth: Arc<AuthManager>) -> Self {
        Self {
            api,
            auth,
            state: Mutex::new(BrowseState {
                filters: ProductFilters::default(),
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
            }),
        }
    }

    pub fn filters(&self) -> ProductFilters {
        self.state.lock().filters.clone()
    }

    pub fn clear_filters(&self) {
        self.state.lock().filters = ProductFilters::default();
    }

    pub fn page(&self) -> u32 {
        self.state.lock().page
    }

    pub fn set_page(&self, page: u32) {
        self.state.lock().page = page.max(1);
    }

    pub fn page_size(&self) -> u32 {
        self.state.lock().page_size
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.state.lock().page_size = page_size.max(1);
    }

    /// Merge `filters` into the current ones and fetch the catalogue
    pub async fn load_products(&self, filters: ProductFilters) -> ClientResult<Vec<Listing>> {
        let (filters, page, limit) = {
            let mut state = self.state.lock();
            state.filters.merge(filters);
            (state.filters.clone(), state.page, state.page_size)
        };

        let query = ListingQuery {
            filters: &filters,
            page,
            limit,
        };
        let token = self.auth.token();
        let envelope: ListingsEnvelope = self
            .api
            .get_with_query("products", &query, token.as_deref())
            .await?;

        tracing::debug!(count = envelope.products.len(), "Loaded products");

        Ok(envelope.products)
    }

    pub async fn get_product(&self, id: Uuid) -> ClientResult<Listing> {
        let token = self.auth.token();
        let envelope: ListingEnvelope = self
            .api
            .get(&format!("products/{}", id), token.as_deref())
            .await?;
        Ok(envelope.product)
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let token = self.auth.bearer()?;
        let envelope: MutationEnvelope = self
            .api
            .send_json(Method::POST, "products", draft, Some(&token))
            .await?;
        Ok(envelope.product)
    }

    pub async fn update_product(&self, id: Uuid, update: &ProductUpdate) -> ClientResult<Product> {
        let token = self.auth.bearer()?;
        let envelope: MutationEnvelope = self
            .api
            .send_json(Method::PUT, &format!("products/{}", id), update, Some(&token))
            .await?;
        Ok(envelope.product)
    }

    /// Returns the server's confirmation message
    pub async fn delete_product(&self, id: Uuid) -> ClientResult<String> {
        let token = self.auth.bearer()?;
        let envelope: MessageEnvelope = self
            .api
            .send_empty(Method::DELETE, &format!("products/{}", id), Some(&token))
            .await?;
        Ok(envelope.message)
    }

    pub async fn toggle_favorite(&self, product_id: Uuid) -> ClientResult<FavoriteToggle> {
        let token = self.auth.bearer()?;
        self.api
            .send_empty(
                Method::POST,
                &format!("products/{}/favorite", product_id),
                Some(&token),
            )
            .await
    }

    pub async fn get_favorites(&self) -> ClientResult<Vec<Listing>> {
        let token = self.auth.bearer()?;
        let envelope: ListingsEnvelope = self.api.get("favorites", Some(&token)).await?;
        Ok(envelope.products)
    }

    pub async fn submit_review(&self, draft: &ReviewDraft) -> ClientResult<Review> {
        let token = self.auth.bearer()?;
        let envelope: ReviewEnvelope = self
            .api
            .send_json(Method::POST, "reviews", draft, Some(&token))
            .await?;
        Ok(envelope.review)
    }

    pub async fn seller_reviews(
        &self,
        seller_id: Uuid,
        page: u32,
        limit: u32,
    ) -> ClientResult<SellerReviews> {
        self.api
            .get_with_query(
                &format!("reviews/seller/{}", seller_id),
                &PageQuery { page, limit },
                None,
            )
            .await
    }

    pub async fn submit_report(&self, draft: &ReportDraft) -> ClientResult<Report> {
        let token = self.auth.bearer()?;
        let envelope: ReportEnvelope = self
            .api
            .send_json(Method::POST, "reviews/report", draft, Some(&token))
            .await?;

        tracing::info!(report_id = %envelope.report.id, "Report submitted");

        Ok(envelope.report)
    }

    pub async fn seller_profile(&self, seller_id: Uuid) -> ClientResult<UserProfile> {
        let envelope: UserEnvelope = self
            .api
            .get(&format!("users/{}", seller_id), None)
            .await?;
        Ok(envelope.user)
    }
}
