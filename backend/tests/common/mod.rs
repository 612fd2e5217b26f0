//! Shared harness for router tests
//!
//! Builds the full application router over a fresh [`MemoryStore`] and
//! drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use diecast_market_server::auth::{sign_init_data, AuthSettings};
use diecast_market_server::config::HttpOptions;
use diecast_market_server::store::MemoryStore;
use diecast_market_server::{build_router, AppState};

pub const BOT_TOKEN: &str = "1234567:router-test-token";
pub const JWT_SECRET: &str = "router-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

/// A logged-in test user
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: JWT_SECRET.to_string(),
        jwt_ttl_seconds: 3600,
        telegram_bot_token: Some(BOT_TOKEN.to_string()),
        telegram_auth_max_age_seconds: 86_400,
    }
}

pub fn init_data_for(telegram_id: i64, first_name: &str) -> String {
    let auth_date = Utc::now().timestamp().to_string();
    let user = json!({
        "id": telegram_id,
        "first_name": first_name,
        "username": first_name.to_lowercase(),
    })
    .to_string();
    sign_init_data(
        &[("auth_date", auth_date.as_str()), ("user", user.as_str())],
        BOT_TOKEN,
    )
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), auth_settings());
        let router = build_router(state, &HttpOptions::default());
        Self { router, store }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Log in through `/api/auth/telegram`
    pub async fn login(&self, telegram_id: i64, first_name: &str) -> TestUser {
        let (status, body) = self
            .post(
                "/api/auth/telegram",
                None,
                json!({ "initData": init_data_for(telegram_id, first_name) }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        TestUser {
            id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Create a product and return its id
    pub async fn create_product(&self, seller: &TestUser, body: Value) -> Uuid {
        let (status, response) = self
            .post("/api/products", Some(&seller.token), body)
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", response);
        response["product"]["id"].as_str().unwrap().parse().unwrap()
    }
}

pub fn camaro() -> Value {
    json!({
        "title": "Custom '67 Camaro",
        "price": "45.00",
        "category": "custom",
        "rarity": "rare",
        "condition": "excellent",
    })
}
