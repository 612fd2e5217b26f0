//! Authentication HTTP handlers
//!
//! The Mini App posts its Telegram init data once and keeps the returned
//! bearer token; `/auth/verify` lets it check a stored token on start-up.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::AuthenticatedUser;
use crate::auth::AuthService;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::models::UserProfile;
use crate::services::UserService;

/// Request body for Telegram login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramLoginRequest {
    pub init_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// POST /api/auth/telegram - Exchange init data for a bearer token
pub async fn telegram_login(
    State(auth_service): State<Arc<AuthService>>,
    ApiJson(req): ApiJson<TelegramLoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let init_data = req
        .init_data
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::validation("initData is required"))?;

    let (token, user) = auth_service.login_with_telegram(&init_data).await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/verify - Return the user behind the bearer token
pub async fn verify(
    State(user_service): State<Arc<UserService>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<UserResponse>> {
    let profile = user_service.profile(user.user_id).await?;

    Ok(Json(UserResponse {
        success: true,
        user: profile,
    }))
}
