//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{AuthService, AuthSettings};
use crate::services::{ProductService, ReportService, ReviewService, UserService};
use crate::store::MarketStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub product_service: Arc<ProductService>,
    pub review_service: Arc<ReviewService>,
    pub report_service: Arc<ReportService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire every service to the same store
    pub fn new(store: Arc<dyn MarketStore>, auth_settings: AuthSettings) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(store.clone(), auth_settings)),
            product_service: Arc::new(ProductService::new(store.clone())),
            review_service: Arc::new(ReviewService::new(store.clone())),
            report_service: Arc::new(ReportService::new(store.clone())),
            user_service: Arc::new(UserService::new(store)),
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<ProductService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.product_service.clone()
    }
}

impl FromRef<AppState> for Arc<ReviewService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.review_service.clone()
    }
}

impl FromRef<AppState> for Arc<ReportService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.report_service.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}
