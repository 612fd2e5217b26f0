//! Client bootstrap

use std::sync::Arc;

use crate::api::{ApiClient, ClientConfig};
use crate::auth::AuthManager;
use crate::card::ProductCard;
use crate::error::ClientResult;
use crate::models::{Listing, ProductFilters};
use crate::products::ProductManager;
use crate::session::SessionStore;

/// One client session: both managers over a shared HTTP client
pub struct MarketApp {
    pub auth: Arc<AuthManager>,
    pub products: ProductManager,
}

impl MarketApp {
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let api = ApiClient::new(config);
        let auth = Arc::new(AuthManager::new(api.clone(), store)?);
        let products = ProductManager::new(api, auth.clone());
        Ok(Self { auth, products })
    }

    /// Validate any stored session; returns whether the user is logged in
    pub async fn start(&self) -> ClientResult<bool> {
        let authenticated = self.auth.check_auth().await?;
        tracing::info!(authenticated, "Marketplace client started");
        Ok(authenticated)
    }

    /// Card view models for the current viewer
    pub fn cards(&self, listings: &[Listing]) -> Vec<ProductCard> {
        let viewer = self.auth.current_user();
        listings
            .iter()
            .map(|listing| ProductCard::new(listing, viewer.as_ref()))
            .collect()
    }

    /// Load the catalogue with merged filters and build its cards
    pub async fn catalogue(&self, filters: ProductFilters) -> ClientResult<Vec<ProductCard>> {
        let listings = self.products.load_products(filters).await?;
        Ok(self.cards(&listings))
    }
}
