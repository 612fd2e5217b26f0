//! Authentication service
//!
//! Resolves bearer tokens to users and exchanges Telegram init data for
//! bearer tokens.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{ApiError, ApiResult};
use crate::models::{TelegramProfile, User};
use crate::store::MarketStore;

use super::jwt::{generate_token, user_id_from_claims, verify_token};
use super::telegram::verify_init_data;

/// Token and Telegram settings, taken from [`crate::config::Config`]
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub telegram_bot_token: Option<String>,
    pub telegram_auth_max_age_seconds: i64,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn MarketStore>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(store: Arc<dyn MarketStore>, settings: AuthSettings) -> Self {
        Self { store, settings }
    }

    /// Resolve a bearer token to a non-banned user
    pub async fn authenticate(&self, token: &str) -> ApiResult<User> {
        let claims = verify_token(token, &self.settings.jwt_secret)?;

        let user_id = user_id_from_claims(&claims)
            .map_err(|_| ApiError::Unauthenticated("User not found".to_string()))?;

        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthenticated("User not found".to_string()))?;

        if user.is_banned {
            tracing::warn!(user_id = %user.id, "Banned user attempted an authenticated request");
            return Err(ApiError::forbidden("Account is banned"));
        }

        Ok(user)
    }

    /// Validate Mini App init data, upsert the user and issue a token
    pub async fn login_with_telegram(&self, init_data: &str) -> ApiResult<(String, User)> {
        let bot_token = self.settings.telegram_bot_token.as_deref().ok_or_else(|| {
            ApiError::InternalError("TELEGRAM_BOT_TOKEN is not configured".to_string())
        })?;

        let verified = verify_init_data(
            init_data,
            bot_token,
            self.settings.telegram_auth_max_age_seconds,
            Utc::now().timestamp(),
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected Telegram init data");
            ApiError::Unauthenticated("Invalid Telegram init data".to_string())
        })?;

        let profile = TelegramProfile::from(verified.user);
        let user = self.store.upsert_telegram_user(&profile).await?;

        if user.is_banned {
            return Err(ApiError::forbidden("Account is banned"));
        }

        let token = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, telegram_id = user.telegram_id, "User logged in via Telegram");

        Ok((token, user))
    }

    /// Sign a bearer token for an already resolved user
    pub fn issue_token(&self, user: &User) -> ApiResult<String> {
        Ok(generate_token(
            user,
            &self.settings.jwt_secret,
            self.settings.jwt_ttl_seconds,
        )?)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.settings.jwt_secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sign_init_data;
    use crate::store::MemoryStore;

    const BOT_TOKEN: &str = "42:unit-test";

    fn service(store: Arc<MemoryStore>) -> AuthService {
        AuthService::new(
            store,
            AuthSettings {
                jwt_secret: "unit-secret".to_string(),
                jwt_ttl_seconds: 3600,
                telegram_bot_token: Some(BOT_TOKEN.to_string()),
                telegram_auth_max_age_seconds: 86_400,
            },
        )
    }

    fn init_data(telegram_id: i64) -> String {
        let now = Utc::now().timestamp().to_string();
        let user = format!(r#"{{"id":{},"first_name":"Nina"}}"#, telegram_id);
        sign_init_data(&[("auth_date", now.as_str()), ("user", user.as_str())], BOT_TOKEN)
    }

    #[tokio::test]
    async fn test_login_then_authenticate() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(store);

        let (token, user) = auth.login_with_telegram(&init_data(5)).await.unwrap();
        let resolved = auth.authenticate(&token).await.unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.telegram_id, 5);
    }

    #[tokio::test]
    async fn test_banned_user_is_forbidden() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(store.clone());

        let (token, user) = auth.login_with_telegram(&init_data(6)).await.unwrap();
        store.set_banned(user.id, true).await;

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_token_for_unknown_user() {
        let auth = service(Arc::new(MemoryStore::new()));
        let (_, user) = auth.login_with_telegram(&init_data(7)).await.unwrap();

        let other = service(Arc::new(MemoryStore::new()));
        let token = other.issue_token(&user).unwrap();
        let err = other.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
