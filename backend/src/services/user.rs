//! Public user profiles

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::UserProfile;
use crate::store::MarketStore;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn MarketStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    pub async fn profile(&self, user_id: Uuid) -> ApiResult<UserProfile> {
        self.store
            .find_user(user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    /// Store connectivity, for `/health`
    pub async fn store_status(&self) -> Result<(), String> {
        self.store.ping().await.map_err(|e| e.to_string())
    }
}
